fn main() {
    if let Err(e) = pibench::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
