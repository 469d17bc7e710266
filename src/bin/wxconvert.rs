//! Weather Database Converter.
//!
//! Converts a database from the old view based format to the new format which stores derived
//! values. The new database must already exist, and its metadata must be regenerated afterwards.

use std::error::Error;

use log::info;
use wxstation_data::{convert_files, logger, ConvertCmdLineArgs, WxDataErr};

fn main() {
    if let Err(ref e) = run() {
        println!("error: {}", e);

        let mut err: &dyn Error = e;

        while let Some(cause) = err.source() {
            println!("caused by: {}", cause);
            err = cause;
        }

        ::std::process::exit(1);
    }
}

fn run() -> Result<(), WxDataErr> {
    let app = ConvertCmdLineArgs::new_app(
        "wxconvert",
        "Convert a weather database from the old to the new format.",
    );

    let (args, _matches) = ConvertCmdLineArgs::matches(app)?;

    logger::init(args.verbose());

    let summary = convert_files(&args.new_db(), &args.old_db())?;
    info!("{}", summary);

    println!("Done, {}.", summary);
    println!(
        "Regenerate the metadata of {} before using it.",
        args.new_db().display()
    );

    Ok(())
}
