//! Process exit codes, taken from BSD `sysexits.h`

/// Bad command line or refused `config init`
pub const USAGE: i32 = 64;

/// Unparseable literal, malformed tree, step limit or overflow
pub const DATAERR: i32 = 65;

/// Input file could not be read
pub const NOINPUT: i32 = 66;

/// Broken tree invariant inside the engine
pub const SOFTWARE: i32 = 70;

/// Writing a config file failed
pub const IOERR: i32 = 74;

/// Config file or environment override is invalid
pub const CONFIG: i32 = 78;
