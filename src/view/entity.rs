//! Entity page model
//!
//! An [`EntityView`] is the root-level rendering of one named resource: its
//! label, its properties materialized into [`ViewNode`] trees, its
//! `owl:sameAs` targets, and optionally properties fetched from Wikidata.

use super::{LabelResolver, Materializer, PropertyMap, ViewContext, ViewError, ViewNode, ViewResult};
use crate::rdf::{local_name, NamedNode, RdfPredicate, RdfSubject, OWL_SAME_AS, WIKIDATA_ENTITY_NS};
use crate::wikidata::ExternalEnricher;
use serde::Serialize;
use tracing::{debug, info};

/// Key prefix of properties merged in from Wikidata
pub const WIKIDATA_PROPERTY_PREFIX: &str = "wikidata:";

/// One `owl:sameAs` target of an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SameAsTarget {
    /// IRI or literal text of the target
    pub target: String,
    /// True when the target is an IRI; literal targets are recorded only
    pub resolvable: bool,
}

/// Rendered entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityView {
    /// Full IRI the identifier resolved to
    pub identifier: String,
    pub label: String,
    pub properties: PropertyMap,
    pub same_as: Vec<SameAsTarget>,
    /// Wikidata id whose properties were merged in, if any
    pub enriched_from: Option<String>,
}

impl EntityView {
    /// The Wikidata entity to enrich from: the single resolvable `sameAs`
    /// target in the Wikidata entity namespace. None when there are zero or
    /// several candidates.
    pub fn wikidata_target(&self) -> Option<&str> {
        let mut candidates = self
            .same_as
            .iter()
            .filter(|s| s.resolvable && s.target.starts_with(WIKIDATA_ENTITY_NS));
        match (candidates.next(), candidates.next()) {
            (Some(only), None) => Some(only.target.as_str()),
            _ => None,
        }
    }

    /// Merge externally sourced properties under the Wikidata key prefix
    pub fn merge_external(&mut self, source_id: &str, external: PropertyMap) {
        if external.is_empty() {
            return;
        }
        for (property, values) in external {
            self.properties
                .entry(format!("{WIKIDATA_PROPERTY_PREFIX}{property}"))
                .or_default()
                .extend(values);
        }
        self.enriched_from = Some(source_id.to_string());
    }
}

/// Builds [`EntityView`]s
pub struct EntityViewBuilder<'a> {
    ctx: ViewContext<'a>,
    labels: LabelResolver<'a>,
    materializer: Materializer<'a>,
    same_as: RdfPredicate,
}

impl<'a> EntityViewBuilder<'a> {
    pub fn new(ctx: ViewContext<'a>) -> Self {
        Self {
            ctx,
            labels: ctx.labels(),
            materializer: Materializer::new(ctx),
            same_as: RdfPredicate::new_unchecked(OWL_SAME_AS),
        }
    }

    /// Resolve an identifier against the primary namespace, then the
    /// fallback namespace. Only IRIs that are the subject of some triple count.
    pub fn resolve_root(&self, entity_id: &str) -> ViewResult<NamedNode> {
        let config = self.ctx.config;
        [&config.primary_namespace, &config.fallback_namespace]
            .into_iter()
            .filter_map(|ns| NamedNode::new(&format!("{ns}{entity_id}")).ok())
            .find(|iri| self.ctx.store.has_subject(&RdfSubject::NamedNode(iri.clone())))
            .ok_or_else(|| ViewError::NotFound(entity_id.to_string()))
    }

    /// Build the view from local data only
    pub fn build_local(&self, entity_id: &str) -> ViewResult<EntityView> {
        let root = self.resolve_root(entity_id)?;
        let subject = RdfSubject::NamedNode(root.clone());

        let mut view = EntityView {
            identifier: root.as_str().to_string(),
            label: self.labels.resolve(&root.clone().into()),
            properties: PropertyMap::new(),
            same_as: Vec::new(),
            enriched_from: None,
        };

        for (predicate, object) in self.ctx.store.predicate_objects(&subject) {
            let key = self.labels.predicate_label(predicate);
            if predicate == &self.same_as {
                view.same_as.push(SameAsTarget {
                    target: object.lexical().to_string(),
                    resolvable: object.is_named_node(),
                });
            }
            // Every top-level value gets its own traversal
            let value = self.materializer.materialize_root(&object.clone().into());
            view.properties.entry(key).or_default().push(value);
        }

        debug!(
            "Built view for {} with {} properties",
            view.identifier,
            view.properties.len()
        );
        Ok(view)
    }

    /// Build the view and merge Wikidata properties when the entity has a
    /// single Wikidata `sameAs` target. Enrichment never turns a found
    /// entity into an error.
    pub async fn build(
        &self,
        entity_id: &str,
        enricher: &dyn ExternalEnricher,
    ) -> ViewResult<EntityView> {
        let mut view = self.build_local(entity_id)?;

        if let Some(target) = view.wikidata_target() {
            let external_id = local_name(target).to_string();
            let external = enricher.fetch_external_properties(&external_id).await;
            info!(
                "Enriched {} from {} with {} properties",
                view.identifier,
                external_id,
                external.len()
            );
            view.merge_external(&external_id, external);
        }

        Ok(view)
    }
}

/// Literal-only property map, the shape external sources produce
pub fn literal_properties<I, K, V>(pairs: I) -> PropertyMap
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut properties = PropertyMap::new();
    for (key, value) in pairs {
        properties
            .entry(key.into())
            .or_default()
            .push(ViewNode::literal(value));
    }
    properties
}
