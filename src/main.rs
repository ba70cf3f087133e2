use cheatsheet_build::config::{self, BuildConfig};
use cheatsheet_build::stylesheet::{self, CssCompiler};
use cheatsheet_build::{assets, docs, hashing, output, snowflake};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cheatsheet-build")]
#[command(about = "Build pipeline for the documentation and cheatsheet site")]
#[command(long_about = "\
Build pipeline for the documentation and cheatsheet site

Project structure (defaults, override in build.toml):

  ./
  ├── build.toml                   # Optional, see 'gen-config'
  ├── docs/                        # Documentation sources
  │   └── cljs.core/
  │       └── map.cljsdoc          # =====function / =====signature / ...
  ├── styles/main.css              # Stylesheet source
  └── public/                      # Site assets
      ├── docs.json                # Generated documentation index
      ├── css/main.min.css         # Compiled stylesheet
      └── cheatsheet/index.html

Documentation file format:

  =====function
  cljs.core/map
  =====signature
  (map f coll)
  =====description
  Markdown text.
  =====related
  cljs.core/reduce

Run 'cheatsheet-build gen-config' to generate a documented build.toml.")]
#[command(version)]
struct Cli {
    /// Project root directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse documentation files and write the JSON index
    Docs,
    /// Parse documentation files without writing the index
    CheckDocs,
    /// Compile the stylesheet
    Stylesheet,
    /// Run the full cheatsheet build: clean → stylesheet → copy → hash
    Cheatsheet,
    /// Rename published assets with content hashes
    Hash,
    /// Report class names used in CSS but not JS, and vice versa
    Snowflake,
    /// Print a stock build.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let root = cli.root.as_path();

    match cli.command {
        Command::Docs => {
            let config = config::load_config(root)?;
            let source = root.join(&config.docs.source_dir);
            let artifact = root.join(&config.docs.output);
            println!("==> Building docs from {}", source.display());
            let build = docs::generate_docs(&source, config.docs.extension(), &artifact)?;
            output::print_docs_output(&build, &source);
            println!("{}", output::format_docs_summary(&build, &artifact));
        }
        Command::CheckDocs => {
            let config = config::load_config(root)?;
            let source = root.join(&config.docs.source_dir);
            println!("==> Checking {}", source.display());
            let build = docs::build_docs(&source, config.docs.extension())?;
            output::print_docs_output(&build, &source);
            println!("==> {} valid", build.collection.len());
        }
        Command::Stylesheet => {
            let config = config::load_config(root)?;
            compile_stylesheet(root, &config)?;
        }
        Command::Cheatsheet => {
            let config = config::load_config(root)?;
            let publish_dir = root.join(&config.cheatsheet.publish_dir);

            println!("==> Stage 1: Cleaning {}", publish_dir.display());
            assets::clean_dir(&publish_dir)?;

            println!("==> Stage 2: Compiling stylesheet");
            compile_stylesheet(root, &config)?;

            println!("==> Stage 3: Copying assets");
            let report = assets::copy_entries(&config.cheatsheet.copy, root, &publish_dir)?;
            output::print_copy_output(&report, root);

            println!("==> Stage 4: Hashing assets");
            hash_assets(&publish_dir, &config)?;

            println!("==> Cheatsheet complete: {}", publish_dir.display());
        }
        Command::Hash => {
            let config = config::load_config(root)?;
            hash_assets(&root.join(&config.cheatsheet.publish_dir), &config)?;
        }
        Command::Snowflake => {
            let config = config::load_config(root)?;
            let report = snowflake::audit(
                root,
                &config.snowflake.css,
                &config.snowflake.js,
                &config.snowflake.pattern,
            )?;
            output::print_snowflake_output(&report, &config.snowflake.css);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn compile_stylesheet(root: &Path, config: &BuildConfig) -> Result<(), Box<dyn std::error::Error>> {
    let source = root.join(&config.stylesheet.source);
    let target = root.join(&config.stylesheet.output);
    let compiler = CssCompiler::new(config.stylesheet.compress);
    let bytes = stylesheet::compile_stylesheet(&compiler, &source, &target)?;
    output::print_stylesheet_output(&source, &target, bytes);
    Ok(())
}

fn hash_assets(publish_dir: &Path, config: &BuildConfig) -> Result<(), Box<dyn std::error::Error>> {
    let hashed = hashing::hash_assets(
        publish_dir,
        &config.cheatsheet.hash,
        &config.cheatsheet.html,
        config.cheatsheet.hash_length,
    )?;
    output::print_hash_output(&hashed);
    Ok(())
}
