use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("lanlight {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: lanlight");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!("target: {}", option_env!("LANLIGHT_BUILD_TARGET").unwrap_or("unknown"));
    println!("default_port: {}", lanlight::DEFAULT_PORT);
    println!("response_expiry: {:?}", lanlight::session::DEFAULT_RESPONSE_EXPIRY);
    println!("protocol_header: {} bytes", lanlight::frame::HEADER_SIZE);

    Ok(SUCCESS)
}
