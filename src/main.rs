fn main() {
    if let Err(err) = net_model_translator::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
