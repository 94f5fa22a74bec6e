use crclink_frame::{TagSet, BLOCK_SIZE, DEFAULT_POLYNOMIAL};

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("crclink {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    let tags = TagSet::default();
    println!("name: crclink");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "target: {}",
        option_env!("CRCLINK_BUILD_TARGET").unwrap_or("unknown")
    );
    println!(
        "profile: {}",
        option_env!("CRCLINK_BUILD_PROFILE").unwrap_or("unknown")
    );
    println!("git_hash: {}", option_env!("GIT_HASH").unwrap_or("unknown"));
    println!("features: async={}, cli=true", cfg!(feature = "async"));
    println!("block_size: {BLOCK_SIZE}");
    println!("default_polynomial: {DEFAULT_POLYNOMIAL:#04x}");
    println!(
        "default_tags: start={:?} stop={:?} escape={:?}",
        tags.start() as char,
        tags.stop() as char,
        tags.escape() as char
    );

    Ok(SUCCESS)
}
