use crate::cli::LibraryArgs;
use crate::error::Result;
use molcage::core::io::library::LibraryFile;
use tracing::info;

pub fn run(args: LibraryArgs) -> Result<()> {
    info!("Loading linker library from {:?}", &args.path);
    let library = LibraryFile::read_from_path(&args.path)?;

    println!(
        "{} fragment(s) in {}",
        library.len(),
        args.path.display()
    );
    for (index, entry) in library.entries().iter().enumerate() {
        let connection = match entry.connection {
            Some((a, b)) => format!("connection {}-{}", a, b),
            None => "no connection".to_string(),
        };
        println!(
            "{:>4}  {:<24} {:>4} atoms  {}",
            index,
            entry.name,
            entry.labels.len(),
            connection
        );
    }
    Ok(())
}
