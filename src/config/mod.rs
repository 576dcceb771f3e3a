//! Build configuration for modprops.
//!
//! A module is described by one TOML file, `modprops.toml` unless `--config` names
//! another. It may point at a Gradle-style `gradle.properties` file whose entries
//! fill any platform setting the TOML leaves unset, and which also become root
//! project properties for templates.
//!
//! # Configuration File
//!
//! ```toml
//! [project]
//! name = "demo"              # root project name
//! module = "NeoForge"        # module name, defaults to the project name
//! group = "com.example"
//! version = "1.0.0"
//!
//! [platform]
//! kind = "neoforge"          # common | neoforge | fabric
//! properties_file = "gradle.properties"
//!
//! [platform.minecraft]
//! version = "1.21"
//! additional_versions = ["1.21.1"]
//!
//! [platform.java]
//! version = 21
//!
//! [platform.neoforge]
//! version = "21.0.167"
//!
//! [root_properties]          # properties of the root project
//! mod_id = "demo"
//!
//! [properties]               # properties of this module
//! display_name = "Demo"
//!
//! [[dependencies]]
//! group = "mezz.jei"
//! name = "jei-1.21-neoforge"
//! version = "[19.0,)"
//! ```
//!
//! # Modules
//!
//! - `settings` - the schema, loading and `gradle.properties` defaults
//! - `parser` - async TOML and `.properties` file reading with path context

mod parser;
mod settings;

pub use parser::{parse_config, read_properties_file};
pub use settings::{
    BuildConfig, DEFAULT_CONFIG_FILE, FabricSettings, JavaSettings, MinecraftSettings,
    NeoForgeSettings, PlatformKind, PlatformSettings, ProjectSettings,
};
