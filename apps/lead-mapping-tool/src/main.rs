//! CLI tool for lead form mapping.
//!
//! Provides commands for:
//! - Inspecting mappable and mandatory fields of a doctype
//! - Validating and committing form mappings
//! - Provisioning campaigns and ads for forms
//! - Building lead documents from raw lead data

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use lead_mapping_core::config::MappingConfig;
use lead_mapping_core::form::FormConfig;
use lead_mapping_core::formatting::{register_builtin_functions, FormattingRegistry};
use lead_mapping_core::lead::{build_lead, LeadFieldData};
use lead_mapping_core::provisioning::{create_ads, create_campaign};
use lead_mapping_core::schema::{load_schema_file, SchemaProvider, SchemaRegistry};
use lead_mapping_core::store::{DocumentStore, FileStore};
use lead_mapping_core::workflow::{save_quick_map, QuickMapRequest};
use lead_mapping_core::{FieldMappingResolver, MappingSet};

/// Command-line arguments for the mapping tool.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Data directory of the document store
    #[arg(long, default_value = "./data", global = true)]
    data_dir: PathBuf,

    /// Schema file with doctype field lists
    #[arg(long, default_value = "./schema.json", global = true)]
    schema_file: PathBuf,

    /// Region for phone numbers written without a country code
    #[arg(long, default_value = "IN", global = true)]
    phone_region: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List mappable and mandatory fields of a doctype
    Fields {
        #[arg(long)]
        doctype: String,
    },
    /// List available formatting functions
    Functions,
    /// Validate a mapping file against a doctype
    Validate {
        #[arg(long)]
        doctype: String,
        /// JSON array of mapping entries
        #[arg(long)]
        mapping_file: PathBuf,
    },
    /// Add or replace a form configuration from a JSON file
    ImportForm {
        #[arg(long)]
        form_file: PathBuf,
    },
    /// Validate a mapping file and save it onto a form
    Commit {
        #[arg(long)]
        form: String,
        /// Target doctype (defaults to the form's lead doctype)
        #[arg(long)]
        doctype: Option<String>,
        #[arg(long)]
        mapping_file: PathBuf,
        #[arg(long)]
        assignee_doctype: Option<String>,
        #[arg(long)]
        assign_to: Option<String>,
    },
    /// Create or link the campaign of a form
    CreateCampaign {
        #[arg(long)]
        form: String,
    },
    /// Create or link the ads of a form
    CreateAds {
        #[arg(long)]
        form: String,
    },
    /// Build a lead document from a JSON array of lead field data
    Apply {
        #[arg(long)]
        form: String,
        #[arg(long)]
        lead_file: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    let config = MappingConfig {
        data_dir: args.data_dir.clone(),
        default_phone_region: args.phone_region.clone(),
        ..Default::default()
    };

    let formatting = FormattingRegistry::new();
    register_builtin_functions(&formatting, &config)?;

    match args.command {
        Command::Fields { doctype } => {
            let schemas = load_schemas(&args.schema_file)?;
            let resolver = FieldMappingResolver::load(&schemas, &doctype)?;
            println!("Mappable fields of {}:", doctype);
            for field in resolver.mappable_fields() {
                let marker = if resolver.mandatory_fields().contains(field) {
                    " (mandatory)"
                } else {
                    ""
                };
                println!("  {}{}", field, marker);
            }
            let unmappable: Vec<&String> = resolver
                .mandatory_fields()
                .iter()
                .filter(|f| !resolver.is_mappable(f))
                .collect();
            if !unmappable.is_empty() {
                println!("Mandatory fields that cannot be mapped: {:?}", unmappable);
            }
        }
        Command::Functions => {
            for name in formatting.function_names() {
                println!("{}", name);
            }
        }
        Command::Validate {
            doctype,
            mapping_file,
        } => {
            let schemas = load_schemas(&args.schema_file)?;
            let fields = schemas.get_schema(&doctype)?;
            let resolver = FieldMappingResolver::from_schema(&doctype, &fields);
            let mapping = read_mapping(&mapping_file)?;
            let result = resolver.validate(&mapping);
            println!("{}", serde_json::to_string_pretty(&result)?);
            if !result.is_committable() {
                bail!(
                    "{} incomplete mapping entries",
                    result.incomplete_entries.len()
                );
            }
        }
        Command::ImportForm { form_file } => {
            let contents = fs::read_to_string(&form_file)
                .with_context(|| format!("Failed to read {}", form_file.display()))?;
            let form: FormConfig = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", form_file.display()))?;
            let store = FileStore::open(&config)?;
            let form = store.save_form(form)?;
            tracing::info!("Imported form {}", form.name);
        }
        Command::Commit {
            form,
            doctype,
            mapping_file,
            assignee_doctype,
            assign_to,
        } => {
            let schemas = load_schemas(&args.schema_file)?;
            let store = FileStore::open(&config)?;
            let outcome = save_quick_map(
                &store,
                &schemas,
                &formatting,
                QuickMapRequest {
                    form,
                    lead_doctype: doctype,
                    mapping: read_mapping(&mapping_file)?,
                    assignee_doctype,
                    assign_to,
                },
            )?;
            if outcome.validation.has_warnings() {
                println!(
                    "Warning: mandatory fields missing from the mapping: {}",
                    outcome
                        .validation
                        .missing_mandatory
                        .iter()
                        .cloned()
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
            println!(
                "Fields mapped and saved for form {} ({} entries)",
                outcome.form.name,
                outcome.form.mapping.len()
            );
        }
        Command::CreateCampaign { form } => {
            let store = FileStore::open(&config)?;
            let outcome = create_campaign(&store, &config, &form)?;
            println!("{:?}", outcome);
        }
        Command::CreateAds { form } => {
            let store = FileStore::open(&config)?;
            let outcome = create_ads(&store, &form)?;
            println!("{:?}", outcome);
        }
        Command::Apply { form, lead_file } => {
            let store = FileStore::open(&config)?;
            let form = store.get_form(&form)?;
            let contents = fs::read_to_string(&lead_file)
                .with_context(|| format!("Failed to read {}", lead_file.display()))?;
            let field_data: Vec<LeadFieldData> = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", lead_file.display()))?;
            let lead = build_lead(&form, &field_data, &formatting)?;
            println!("{}", serde_json::to_string_pretty(&lead)?);
        }
    }

    Ok(())
}

fn load_schemas(path: &Path) -> Result<SchemaRegistry> {
    load_schema_file(path).with_context(|| format!("Failed to load schema {}", path.display()))
}

fn read_mapping(path: &Path) -> Result<MappingSet> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}
