use clap::{Parser, Subcommand};
use ids_camera::{Attribute, Value};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// V4L2 device index (/dev/videoN)
    #[arg(short, long, default_value_t = 0)]
    pub device: u32,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lists camera attributes
    List,
    /// Prints every attribute of the camera
    Dump,
    /// Reads one attribute
    Get {
        /// Attribute name, see `list`
        attribute: Attribute,
    },
    /// Writes one attribute
    Set {
        /// Attribute name, see `list`
        attribute: Attribute,
        /// New value; integers, floats and text are accepted
        value: Value,
    },
}
