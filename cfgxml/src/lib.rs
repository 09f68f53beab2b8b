//! cfgxml library
//!
//! Compiles flat `name := value;` configuration documents into an ordered
//! value tree and renders it as XML.
//!
//! ```
//! let env = cfgxml::compile("size := (+ 1 2); box := ([w: size, h: 4]);").unwrap();
//! assert_eq!(env.names().collect::<Vec<_>>(), vec!["size", "box"]);
//! ```

pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod tree;
pub mod util;
pub mod value;

pub use error::{ConfigError, Result};
pub use span::Span;
pub use value::{Environment, Value};

/// Tokenize and parse a whole document
pub fn compile(source: &str) -> Result<Environment> {
    let tokens = lexer::tokenize(source)?;
    parser::parse(tokens)
}
