fn main() {
    let program = std::env::args().next().unwrap_or_else(|| "ramseyc".to_string());

    if let Err(err) = ramsey_drv::run(std::env::args_os()) {
        eprintln!("{program}: {}: {err}", err.label());
        std::process::exit(1);
    }
}
