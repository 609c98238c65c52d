use flagscan::{ErrorKind, FlagTable, FlagValue};
use serde::Deserialize;
use std::{collections::BTreeMap, fs, path::Path};

include!(concat!(env!("OUT_DIR"), "/generated_tests.rs"));

#[derive(Deserialize)]
struct Case {
    table: FlagTable,
    args: Vec<String>,
    #[serde(default)]
    flags: BTreeMap<String, FlagValue>,
    #[serde(default)]
    positionals: Vec<String>,
    error: Option<ErrorKind>,
}

fn check_case(path: impl AsRef<Path>) {
    let path = path.as_ref();
    println!("-------- TESTING {} --------", path.display());

    let case = fs::read_to_string(path).unwrap();
    let case: Case = serde_json::from_str(&case).unwrap();

    let result = flagscan::parse(&case.table, &case.args);
    match (result, case.error) {
        (Ok(result), None) => {
            assert_eq!(result.flags(), &case.flags, "In file: {}", path.display());
            assert_eq!(
                result.positionals(),
                case.positionals,
                "In file: {}",
                path.display()
            );

            let again = flagscan::parse(&case.table, &case.args).unwrap();
            assert_eq!(result, again, "Parsing isn't repeatable");
        }
        (Ok(result), Some(kind)) => panic!("Expected {kind:?}, but parsed {result:?}"),
        (Err(e), None) => panic!("Unexpected parse error: {e}"),
        (Err(e), Some(kind)) => assert_eq!(e.kind(), kind, "In file: {}", path.display()),
    }
}
