fn main() {
    if let Err(err) = kamvas_lib::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
