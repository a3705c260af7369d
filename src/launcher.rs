use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use crate::error::{LaunchError, Result};
use crate::presets::PresetFile;

/// Prepares a build directory and delegates to the native toolchain: a
/// configure step followed by a compile step, the second running only if the
/// first succeeds. Both steps run with the build directory as their working
/// directory and inherit the parent's output streams.
pub struct Launcher {
    source_path: PathBuf,
    build_path: PathBuf,
    configure_program: String,
    compile_program: String,
    configure_args: Vec<String>,
    compile_args: Vec<String>,
    defines: Vec<String>,
    preset: Option<String>,
    ignore_build_status: bool,
}

impl Launcher {
    pub fn new() -> Self {
        Self {
            source_path: PathBuf::from("."),
            build_path: PathBuf::from("build"),
            configure_program: String::from("cmake"),
            compile_program: String::from("make"),
            configure_args: Vec::new(),
            compile_args: Vec::new(),
            defines: Vec::new(),
            preset: None,
            ignore_build_status: false,
        }
    }

    /// Sets the project source directory handed to the configure step.
    pub fn set_path<T>(mut self, path: T) -> Self
    where
        T: Into<PathBuf>,
    {
        self.source_path = path.into();
        self
    }

    /// Sets the build directory, created if missing. Defaults to `build`.
    pub fn set_build_path<T>(mut self, path: T) -> Self
    where
        T: Into<PathBuf>,
    {
        self.build_path = path.into();
        self
    }

    /// Overrides the configure program, e.g. `cmake3`.
    pub fn set_configure_program<T>(mut self, program: T) -> Self
    where
        T: Into<String>,
    {
        self.configure_program = program.into();
        self
    }

    /// Overrides the compile program, e.g. `ninja` or `gmake`.
    pub fn set_compile_program<T>(mut self, program: T) -> Self
    where
        T: Into<String>,
    {
        self.compile_program = program.into();
        self
    }

    pub fn add_configure_arg<T>(mut self, arg: T) -> Self
    where
        T: Into<String>,
    {
        self.configure_args.push(arg.into());
        self
    }

    pub fn add_compile_arg<T>(mut self, arg: T) -> Self
    where
        T: Into<String>,
    {
        self.compile_args.push(arg.into());
        self
    }

    pub fn add_define<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.defines.push(format!("-D{}={}", key.into(), value.into()));
        self
    }

    /// Selects a configure preset from the source directory's
    /// `CMakePresets.json`.
    pub fn set_preset<T>(mut self, preset: T) -> Self
    where
        T: Into<String>,
    {
        self.preset = Some(preset.into());
        self
    }

    /// Discards the toolchain's exit status: a failing configure or compile
    /// step still returns `Ok`. Directory errors remain fatal. This reproduces
    /// the historical launcher behavior where build failures were only visible
    /// on the inherited output streams.
    pub fn ignore_build_status(mut self, ignore: bool) -> Self {
        self.ignore_build_status = ignore;
        self
    }

    /// Runs the launch sequence synchronously, blocking until the toolchain
    /// finishes.
    pub fn launch(&self) -> Result<()> {
        let configure = resolve_tool(&self.configure_program)?;
        let compile = resolve_tool(&self.compile_program)?;

        // Resolve the source path before spawning: the children run inside the
        // build directory, which would break a caller-relative path.
        let source = canonicalize(&self.source_path)?;

        prepare_build_dir(&self.build_path)?;
        let build = canonicalize(&self.build_path)?;

        let preset_arg = match &self.preset {
            Some(name) => {
                let presets = PresetFile::load(&source)?;
                let preset = presets
                    .find(name)
                    .ok_or_else(|| LaunchError::PresetNotFound { name: name.clone() })?;
                Some(format!("--preset={}", preset.name()))
            }
            None => None,
        };

        tracing::debug!(
            "configuring {} in {}",
            source.display(),
            build.display()
        );

        let mut cmd = Command::new(&configure);
        cmd.arg(&source).current_dir(&build);
        if let Some(arg) = &preset_arg {
            cmd.arg(arg);
        }
        cmd.args(&self.defines);
        cmd.args(&self.configure_args);

        let status = cmd.status()?;
        if !status.success() {
            if self.ignore_build_status {
                tracing::debug!("ignoring configure status {}", status);
                return Ok(());
            }
            return Err(LaunchError::ConfigureFailed { status });
        }

        tracing::debug!("compiling in {}", build.display());

        let status = Command::new(&compile)
            .args(&self.compile_args)
            .current_dir(&build)
            .status()?;
        if !status.success() && !self.ignore_build_status {
            return Err(LaunchError::CompileFailed { status });
        }

        Ok(())
    }

    /// Runs the launch sequence on a background thread; the result is
    /// delivered on the returned channel.
    pub fn spawn(self) -> Receiver<Result<()>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let _ = tx.send(self.launch());
        });

        rx
    }
}

impl Default for Launcher {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_tool(tool: &str) -> Result<PathBuf> {
    which::which(tool).map_err(|_| LaunchError::ToolNotFound {
        tool: tool.to_string(),
    })
}

fn canonicalize(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).map_err(|source| LaunchError::DirectoryAccess {
        path: path.to_path_buf(),
        source,
    })
}

/// Ensures the build directory exists. An existing entry that is not a
/// directory aborts the launch before anything is spawned.
fn prepare_build_dir(path: &Path) -> Result<()> {
    if path.exists() {
        if path.is_dir() {
            return Ok(());
        }
        return Err(LaunchError::DirectoryCreation {
            path: path.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::AlreadyExists,
                "entry exists and is not a directory",
            ),
        });
    }

    fs::create_dir_all(path).map_err(|source| LaunchError::DirectoryCreation {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!("created build directory {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn prepare_creates_missing_dir() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("build");

        prepare_build_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn prepare_accepts_existing_dir() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("build");
        fs::create_dir(&dir).unwrap();

        prepare_build_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn prepare_rejects_non_directory_entry() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("build");
        fs::write(&file, "not a directory").unwrap();

        let err = prepare_build_dir(&file).unwrap_err();
        assert!(matches!(err, LaunchError::DirectoryCreation { .. }));
    }

    // The remaining tests drive the full launch sequence against stand-in
    // programs from coreutils instead of a real cmake/make.
    #[cfg(unix)]
    mod launch {
        use super::*;

        fn launcher(tmp: &TempDir) -> Launcher {
            Launcher::new()
                .set_path(tmp.path())
                .set_build_path(tmp.path().join("build"))
                .set_configure_program("true")
                .set_compile_program("true")
        }

        #[test]
        fn creates_build_dir_and_succeeds() {
            let tmp = TempDir::new().unwrap();

            launcher(&tmp).launch().unwrap();
            assert!(tmp.path().join("build").is_dir());
        }

        #[test]
        fn steps_run_inside_build_dir() {
            let tmp = TempDir::new().unwrap();

            launcher(&tmp)
                .set_configure_program("touch")
                .add_configure_arg("configured")
                .set_compile_program("touch")
                .add_compile_arg("compiled")
                .launch()
                .unwrap();

            assert!(tmp.path().join("build").join("configured").exists());
            assert!(tmp.path().join("build").join("compiled").exists());
        }

        #[test]
        fn non_directory_build_entry_skips_delegation() {
            let tmp = TempDir::new().unwrap();
            fs::write(tmp.path().join("build"), "").unwrap();
            let marker = tmp.path().join("ran");

            let err = launcher(&tmp)
                .set_compile_program("touch")
                .add_compile_arg(marker.to_str().unwrap())
                .launch()
                .unwrap_err();

            assert!(matches!(err, LaunchError::DirectoryCreation { .. }));
            assert!(!marker.exists());
        }

        #[test]
        fn compile_skipped_when_configure_fails() {
            let tmp = TempDir::new().unwrap();
            let marker = tmp.path().join("ran");

            let err = launcher(&tmp)
                .set_configure_program("false")
                .set_compile_program("touch")
                .add_compile_arg(marker.to_str().unwrap())
                .launch()
                .unwrap_err();

            assert!(matches!(err, LaunchError::ConfigureFailed { .. }));
            assert!(!marker.exists());
        }

        #[test]
        fn compile_failure_is_reported() {
            let tmp = TempDir::new().unwrap();

            let err = launcher(&tmp)
                .set_compile_program("false")
                .launch()
                .unwrap_err();

            assert!(matches!(err, LaunchError::CompileFailed { .. }));
        }

        #[test]
        fn ignored_status_swallows_build_failure() {
            let tmp = TempDir::new().unwrap();

            launcher(&tmp)
                .set_configure_program("false")
                .ignore_build_status(true)
                .launch()
                .unwrap();
        }

        #[test]
        fn unknown_tool_is_reported() {
            let tmp = TempDir::new().unwrap();

            let err = launcher(&tmp)
                .set_configure_program("definitely-not-a-real-tool")
                .launch()
                .unwrap_err();

            assert!(matches!(err, LaunchError::ToolNotFound { .. }));
        }

        #[test]
        fn unknown_preset_is_reported() {
            let tmp = TempDir::new().unwrap();
            fs::write(
                tmp.path().join("CMakePresets.json"),
                r#"{"configurePresets": [{"name": "default"}]}"#,
            )
            .unwrap();

            let err = launcher(&tmp).set_preset("release").launch().unwrap_err();
            assert!(matches!(err, LaunchError::PresetNotFound { .. }));
        }

        #[test]
        fn spawn_delivers_result() {
            let tmp = TempDir::new().unwrap();

            let rx = launcher(&tmp).spawn();
            rx.recv().unwrap().unwrap();
            assert!(tmp.path().join("build").is_dir());
        }
    }
}
