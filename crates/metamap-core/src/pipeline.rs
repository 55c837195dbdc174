//! Study mapping pipeline with ordered stage execution.
//!
//! A run walks these stages in order:
//! 1. **Fetch**: resolve the spec's schema reference through the cache
//! 2. **Skeleton**: build the ordered traversal tree from the schema body
//! 3. **Validate**: check the record batch shares its identifying attribute
//! 4. **Map**: project the root scope, then each record's series scope and
//!    extension fan-outs, nesting results under the root mapping object
//! 5. **Fill**: merge the root mapping object into the skeleton
//!
//! The first failure aborts the run; no partial document is produced. The
//! cancellation token is honored before every stage and before every record.

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info, info_span};

use metamap_map::{expand_extension, map_scope, validate_batch};
use metamap_model::{AttributeRecord, MapOptions, MappingObject, MappingSpec, StudyLayout};
use metamap_schema::{SchemaCache, SchemaError, SchemaSource, build_skeleton};

use crate::cancel::CancelToken;
use crate::fill::{FilledDocument, fill};

/// Orchestrates one study's mapping runs against a process-lifetime cache.
pub struct MappingPipeline<S> {
    cache: Arc<SchemaCache>,
    source: S,
    layout: StudyLayout,
    options: MapOptions,
}

impl<S: SchemaSource> MappingPipeline<S> {
    /// Create a pipeline over an injected cache and schema source.
    ///
    /// The cache is shared by reference so unrelated runs in the same
    /// process retrieve each schema at most once.
    pub fn new(cache: Arc<SchemaCache>, source: S) -> Self {
        Self {
            cache,
            source,
            layout: StudyLayout::default(),
            options: MapOptions::default(),
        }
    }

    #[must_use]
    pub fn with_layout(mut self, layout: StudyLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: MapOptions) -> Self {
        self.options = options;
        self
    }

    pub fn layout(&self) -> &StudyLayout {
        &self.layout
    }

    /// Map one study batch into a filled document.
    pub fn run(
        &self,
        spec: &MappingSpec,
        records: &[AttributeRecord],
        cancel: &CancelToken,
    ) -> Result<FilledDocument> {
        cancel.checkpoint()?;
        let reference = spec.reference().ok_or(SchemaError::MissingReference)?;
        let fetch_span = info_span!("fetch_schema", reference = %reference);
        let body = fetch_span
            .in_scope(|| self.cache.fetch_from(reference, &self.source))
            .with_context(|| format!("fetch schema {reference}"))?;

        cancel.checkpoint()?;
        let skeleton = build_skeleton(&body).context("build schema skeleton")?;
        debug!(fields = skeleton.len(), "built schema skeleton");

        cancel.checkpoint()?;
        validate_batch(records, &self.layout.identifying_attribute)
            .context("validate study batch")?;

        cancel.checkpoint()?;
        let map_span = info_span!("map_records", records = records.len());
        let root = map_span.in_scope(|| self.map_records(spec, records, cancel))?;

        cancel.checkpoint()?;
        let document = fill(&skeleton, &root).context("fill schema skeleton")?;
        info!(records = records.len(), "mapped study into schema document");
        Ok(document)
    }

    /// Build the root mapping object: root scope from the first record, one
    /// series object per record with extension fan-outs attached, the series
    /// sequence nested under the root in input order.
    fn map_records(
        &self,
        spec: &MappingSpec,
        records: &[AttributeRecord],
        cancel: &CancelToken,
    ) -> Result<MappingObject> {
        let Some(first) = records.first() else {
            // An empty batch fills to the all-null document.
            return Ok(MappingObject::new());
        };

        let root_fragment = spec.scope(&self.layout.root_scope).ok_or_else(|| {
            anyhow!(
                "root scope '{}' is not declared in the mapping specification",
                self.layout.root_scope
            )
        })?;
        let mut root = map_scope(root_fragment, first, &self.options)
            .with_context(|| format!("map root scope '{}'", self.layout.root_scope))?;

        // A specification without the series scope yields a root-only
        // document; extension scopes are explicit configuration, so naming
        // an undeclared one is an error rather than a skip.
        let Some(series_fragment) = spec.scope(&self.layout.series_scope) else {
            return Ok(root);
        };

        let mut series_objects = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            cancel.checkpoint()?;
            let mut series = map_scope(series_fragment, record, &self.options)
                .with_context(|| format!("map record {index} through series scope"))?;

            for extension in &self.layout.extension_scopes {
                let fragment = spec.scope(extension).ok_or_else(|| {
                    anyhow!("extension scope '{extension}' is not declared in the mapping specification")
                })?;
                let fanned = expand_extension(fragment, record, &self.options)
                    .with_context(|| {
                        format!("expand extension scope '{extension}' for record {index}")
                    })?;
                series.attach_sequence(extension.as_str(), fanned);
            }

            series_objects.push(series);
        }
        root.attach_sequence(self.layout.series_scope.as_str(), series_objects);
        Ok(root)
    }
}
