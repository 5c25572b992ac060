//! Generates the node factory module for the syntax tree library.
//!
//! Reads a node-kind declaration file, discovers the catalog of
//! createable/updateable/testable nodes and union types, and writes
//! `factory.generated.ts` next to the existing factory module: one
//! create/update/test function per node kind, union-type predicates,
//! and the `cloneNode`/`acceptTransformer` dispatch functions.
//!
//! The factory module itself is read only to recover the namespace the
//! generated module must reopen; the utilities module is referenced by
//! the generated header, never altered.

use std::path::Path;

use factgen::{discovery::discover, render};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 {
        return usage();
    }

    let types_path = Path::new(&args[0]);
    let factory_path = Path::new(&args[1]);
    let utilities_path = Path::new(&args[2]);

    let types_src = std::fs::read_to_string(types_path).expect("types file should exist");
    let discovery = match discover(&types_src) {
        Ok(discovery) => discovery,
        Err(err) => {
            eprintln!("{}", err.render(&types_src));
            std::process::exit(1);
        }
    };

    let factory_src = std::fs::read_to_string(factory_path).expect("factory file should exist");
    let namespace = render::module_namespace(&factory_src);

    let references = [file_name(factory_path), file_name(utilities_path)];
    let output = render::generate_factory(&discovery, namespace, &references);

    let output_path = factory_path.with_file_name("factory.generated.ts");
    std::fs::write(&output_path, output).expect("failed to write file");
}

fn file_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|name| name.to_str())
        .expect("path should name a file")
}

fn usage() {
    eprintln!("Usage:");
    eprintln!("\tfactgen <types-input-file> <factory-input-file> <utilities-input-file>");
}
