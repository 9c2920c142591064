use std::process;

fn main() {
    match autodoc_cli::run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("autodoc error: {err:#}");
            process::exit(1);
        }
    }
}
