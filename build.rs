use std::ffi::OsStr;
use std::io::Write;
use std::{fs, path::Path};

fn main() {
    let output_path = Path::new(&std::env::var("OUT_DIR").unwrap()).join("generated_tests.rs");
    let mut output_file = fs::File::create(output_path).unwrap();

    writeln!(output_file, "#[cfg(test)]").unwrap();
    writeln!(output_file, "mod generated_tests {{").unwrap();

    let mut paths: Vec<_> = fs::read_dir(Path::new(env!("CARGO_MANIFEST_DIR")).join("cases"))
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    paths.sort();

    for path in paths {
        if path.extension() != Some(OsStr::new("json")) {
            println!("{} isn't a json file, skip", path.display());
            continue;
        }

        writeln!(
            output_file,
            "    #[test]
    fn {}() {{
        super::check_case(\"{}\");
    }}",
            path.file_stem().unwrap().to_str().unwrap(),
            path.to_str().unwrap()
        )
        .unwrap();
    }

    writeln!(output_file, "}}").unwrap();

    println!("cargo:rerun-if-changed=cases/");
}
