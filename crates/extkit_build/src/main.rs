//! Binary entrypoint for `extkit`.

fn main() {
    if let Err(err) = extkit_build::run() {
        eprintln!("Build failed: {err:#}");
        std::process::exit(1);
    }
}
