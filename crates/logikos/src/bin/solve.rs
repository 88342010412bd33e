//! Command-line DIMACS SAT driver

use logikos::cnf::dimacs;
use logikos::sat::{SatResult, Solver};
use std::env;
use std::fs::File;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() > 2 {
        eprintln!("Usage: {} [cnf_file]", args[0]);
        eprintln!("Reads DIMACS CNF from the file, or stdin when absent.");
        process::exit(2);
    }

    let parsed = match args.get(1) {
        Some(path) => File::open(path)
            .map_err(logikos::Error::from)
            .and_then(dimacs::parse),
        None => dimacs::parse(std::io::stdin()),
    };

    let cnf = match parsed {
        Ok(cnf) => cnf,
        Err(error) => {
            eprintln!("error: {}", error);
            process::exit(2);
        }
    };

    match Solver::new(cnf).solve() {
        SatResult::Satisfiable(model) => {
            println!("SAT");
            println!("{}", model);
        }
        SatResult::Unsatisfiable => {
            println!("UNSAT");
            process::exit(1);
        }
    }
}
