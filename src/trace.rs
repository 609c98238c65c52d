macro_rules! traceln {
    ($config: expr, $($arg: tt)*) => {
        if $config.verbose {
            eprintln!("\x1b[2m{}\x1b[0m", format_args!($($arg)*));
        }
    };
}

pub(crate) use traceln;
