use dsn_parse::Dsn;
use std::io;

fn main() {
    for line in io::stdin().lines() {
        let line = line.expect("failed to read line");
        match Dsn::parse(line.as_str()) {
            Ok(dsn) => println!("{dsn:#?}"),
            Err(e) => println!("Error: {e}"),
        };
    }
}
