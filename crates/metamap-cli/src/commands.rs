use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info_span;

use metamap_core::{CancelToken, MappingPipeline};
use metamap_ingest::{FsSchemaSource, load_mapping_spec, load_study_records, write_document};
use metamap_model::{MapOptions, MissingAttributePolicy, StudyLayout};
use metamap_schema::{SchemaCache, SchemaNode, build_skeleton};

use crate::cli::{MapArgs, SkeletonArgs};

/// Outcome of one `map` invocation, for the summary printer.
#[derive(Debug)]
pub struct MapRunResult {
    pub reference: String,
    pub records: usize,
    pub extension_scopes: Vec<String>,
    pub output: Option<PathBuf>,
}

pub fn run_map(args: &MapArgs, cache: &Arc<SchemaCache>) -> Result<MapRunResult> {
    let run_span = info_span!("map", spec = %args.spec.display());
    let _run_guard = run_span.enter();

    let spec = load_mapping_spec(&args.spec).context("load mapping specification")?;

    let mut layout = StudyLayout::new().with_extension_scopes(args.extensions.clone());
    if let Some(identifier) = &args.identifier {
        layout = layout.with_identifying_attribute(identifier.as_str());
    }
    let records = load_study_records(&args.records, &layout).context("load study records")?;

    let schema_dir = args
        .schema_dir
        .clone()
        .or_else(|| args.spec.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    let options = if args.null_missing {
        MapOptions::new().with_missing_attributes(MissingAttributePolicy::NullLeaf)
    } else {
        MapOptions::new()
    };

    let pipeline = MappingPipeline::new(Arc::clone(cache), FsSchemaSource::new(schema_dir))
        .with_layout(layout)
        .with_options(options);
    let document = pipeline.run(&spec, &records, &CancelToken::new())?;

    let output = if args.dry_run {
        None
    } else {
        write_document(&args.out, &document).context("write mapped document")?;
        Some(args.out.clone())
    };

    Ok(MapRunResult {
        reference: spec
            .reference()
            .map(|r| r.as_str().to_string())
            .unwrap_or_default(),
        records: records.len(),
        extension_scopes: pipeline.layout().extension_scopes.clone(),
        output,
    })
}

pub fn run_skeleton(args: &SkeletonArgs) -> Result<()> {
    let contents = fs::read_to_string(&args.schema)
        .with_context(|| format!("read schema {}", args.schema.display()))?;
    let body: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("parse schema {}", args.schema.display()))?;
    let skeleton = build_skeleton(&body).context("build schema skeleton")?;

    for node in skeleton.roots() {
        print_node(node, 0);
    }
    Ok(())
}

fn print_node(node: &SchemaNode, depth: usize) {
    let indent = "  ".repeat(depth);
    match node {
        SchemaNode::Leaf(name) => println!("{indent}{name}"),
        SchemaNode::Object { name, children } => {
            println!("{indent}{name}/");
            for child in children {
                print_node(child, depth + 1);
            }
        }
        SchemaNode::ArrayOfObjects { name, element } => {
            println!("{indent}{name}[]");
            for child in element {
                print_node(child, depth + 1);
            }
        }
    }
}
