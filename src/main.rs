use std::process;

fn main() {
    if let Err(err) = ficha_diu::run() {
        eprintln!("Erro fatal: {err}");
        process::exit(1);
    }
}
