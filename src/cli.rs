//! Minimal CLI: schema (+ hints, settings) → C# sources | class model view
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use json_classgen::{
    CSharpPrinter, ClassRegistry, GeneratorSettings, HintRegistry, HintTable, JsonSchema, RenderedFile,
    generate, render_all,
};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// compile a JSON schema into classes with value equality, deep copy and a rewriting visitor
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// generate C# sources
    Generate(GenerateOut),
    /// print the classified class model (debug view)
    Model(ModelOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more schema files. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    schema: Vec<String>,

    /// hint document (JSON object: schema id → list of hints)
    #[arg(long)]
    hints: Option<PathBuf>,

    /// drop malformed hint entries (with a warning) instead of failing
    #[arg(long, default_value_t = false)]
    lenient_hints: bool,

    /// generator settings file (JSON); flags below override it
    #[arg(long)]
    settings: Option<PathBuf>,

    /// namespace of the generated code
    #[arg(long)]
    namespace: Option<String>,

    /// name of the class generated for the root schema
    #[arg(long)]
    root_class: Option<String>,

    /// prefix of the visitor class
    #[arg(long)]
    schema_name: Option<String>,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output directory, one `<Name>.cs` per unit (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// compare against the files in `--out` instead of writing; fails on drift
    #[arg(long, requires = "out")]
    check: bool,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct ModelOut {
    #[command(flatten)]
    input_settings: InputSettings,
}

/// One schema file, ready for generation.
struct LoadedSchema {
    path: PathBuf,
    schema: JsonSchema,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_settings(&self) -> anyhow::Result<GeneratorSettings> {
        let mut settings = match &self.settings {
            Some(path) => {
                let src = read(path)?;
                GeneratorSettings::from_json_str(&src).with_context(|| format!("in {}", path.display()))?
            }
            None => GeneratorSettings::default(),
        };
        if let Some(namespace) = &self.namespace {
            settings.namespace_name = namespace.clone();
        }
        if let Some(root_class) = &self.root_class {
            settings.root_class_name = Some(root_class.clone());
        }
        if let Some(schema_name) = &self.schema_name {
            settings.schema_name = Some(schema_name.clone());
        }
        Ok(settings)
    }

    fn load_hints(&self) -> anyhow::Result<HintTable> {
        let Some(path) = &self.hints else {
            return Ok(HintTable::new());
        };
        let src = read(path)?;
        let report = HintRegistry::default()
            .load(&src)
            .with_context(|| format!("in {}", path.display()))?;
        let table = if self.lenient_hints {
            report.into_lenient()
        } else {
            report.into_strict().with_context(|| format!("in {}", path.display()))?
        };
        tracing::debug!(entries = table.len(), "loaded hints");
        Ok(table)
    }

    fn load_schemas(&self) -> anyhow::Result<Vec<LoadedSchema>> {
        let paths = resolve_file_path_patterns(&self.schema).context("failed to resolve schema paths")?;
        paths
            .into_iter()
            .map(|path| {
                let src = read(&path)?;
                let schema = JsonSchema::from_json_str(&src).with_context(|| format!("in {}", path.display()))?;
                Ok(LoadedSchema { path, schema })
            })
            .collect()
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Generate(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let settings = target.input_settings.load_settings()?;
                let hints = target.input_settings.load_hints()?;
                let schemas = target.input_settings.load_schemas()?;
                let printer = CSharpPrinter::new(settings.copyright_notice.clone());
                let many = schemas.len() > 1;

                let mut drifted = 0;
                for loaded in &schemas {
                    let units = generate(&loaded.schema, &hints, &settings)
                        .with_context(|| format!("generating from {}", loaded.path.display()))?;
                    let files = render_all(&printer, &units);
                    match target.out.as_ref() {
                        None => files.iter().for_each(|f| print!("{}", f.text)),
                        Some(out) => {
                            let dir = if many { out.join(file_stem(&loaded.path)) } else { out.clone() };
                            if target.check {
                                drifted += check_files(&dir, &files)?;
                            } else {
                                write_files(&dir, &files)?;
                            }
                        }
                    }
                }
                if drifted > 0 {
                    bail!("{drifted} generated file(s) out of date; rerun without --check");
                }
                Ok(())
            }
            Command::Model(target) => {
                let settings = target.input_settings.load_settings()?;
                let hints = target.input_settings.load_hints()?;
                for loaded in target.input_settings.load_schemas()? {
                    let root_class = settings.root_class(loaded.schema.title.as_deref());
                    let registry = ClassRegistry::build(&loaded.schema, &hints, &root_class)
                        .with_context(|| format!("classifying {}", loaded.path.display()))?;
                    print_model(&registry);
                }
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn file_stem(path: &Path) -> String {
    path.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_else(|| "schema".to_string())
}

fn write_files(dir: &Path, files: &[RenderedFile]) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    for file in files {
        let path = dir.join(&file.file_name);
        std::fs::write(&path, &file.text).with_context(|| format!("failed to write {}", path.display()))?;
    }
    tracing::info!(dir = %dir.display(), files = files.len(), "wrote generated sources");
    Ok(())
}

/// Number of files that are missing or differ.
fn check_files(dir: &Path, files: &[RenderedFile]) -> anyhow::Result<usize> {
    let mut drifted = 0;
    for file in files {
        let path = dir.join(&file.file_name);
        let status = match std::fs::read_to_string(&path) {
            Ok(existing) if existing == file.text => "ok".green(),
            Ok(_) => {
                drifted += 1;
                "changed".red()
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                drifted += 1;
                "missing".yellow()
            }
            Err(error) => return Err(error).with_context(|| format!("failed to read {}", path.display())),
        };
        eprintln!("{status:>8} {}", path.display());
    }
    Ok(drifted)
}

fn print_model(registry: &ClassRegistry) {
    for class in registry.classes() {
        println!("{} ({})", class.name.bold(), class.schema_id);
        for p in &class.properties {
            let marker = if p.element_is_schema_defined { "*".cyan() } else { " ".normal() };
            println!(
                "  {marker} {:<24} {:?} depth={} {:?}{}",
                p.name,
                p.kind,
                p.array_depth,
                p.comparison,
                if p.required { " required" } else { "" }
            );
        }
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> anyhow::Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
