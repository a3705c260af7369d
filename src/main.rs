//! One-shot launcher binary: from the current directory, ensure `build/`
//! exists and run the configure and compile steps inside it. Takes no
//! arguments; a failing build is reported through the exit code.

use buildr::Launcher;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(err) = Launcher::new().launch() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
