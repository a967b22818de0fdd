//! Relation option loaders (`relations.ts`)
//!
//! One loader per distinct target entity. Loaders share an in-memory cache
//! keyed by URL, so several relations to the same target fetch once.

use super::writer::{quote, CodeWriter};
use crate::model::{EntityRelation, FeatureConfig};
use crate::naming::NamingContext;

const CACHE_PRELUDE: &str = "export interface RelationOption {
  label: string;
  value: string;
}

interface RelatedRecord {
  id: string;
  name?: string;
  title?: string;
}

const optionCache = new Map<string, Promise<RelationOption[]>>();

function fetchRelationOptions(url: string): Promise<RelationOption[]> {
  const cached = optionCache.get(url);
  if (cached) {
    return cached;
  }
  const pending = request
    .get<RelatedRecord[]>(url)
    .then((items) =>
      items.map((item) => ({ label: item.name ?? item.title ?? item.id, value: item.id })),
    )
    .catch((error: unknown) => {
      optionCache.delete(url);
      throw error;
    });
  optionCache.set(url, pending);
  return pending;
}";

/// Generate the relations helper, `None` when there are no relations
#[must_use]
pub fn generate_relations_helper(
    config: &FeatureConfig,
    relations: &[EntityRelation],
) -> Option<String> {
    render(&NamingContext::new(config, relations))
}

pub(crate) fn render(ctx: &NamingContext) -> Option<String> {
    if ctx.relations.is_empty() {
        return None;
    }

    let mut w = CodeWriter::new();
    w.import(&["request"], "@/utils/request");
    w.blank();
    w.lines(CACHE_PRELUDE);

    for target in ctx.relation_targets() {
        w.blank();
        w.open(format!(
            "export function {}(): Promise<RelationOption[]> {{",
            target.loader
        ));
        w.line(format!("return fetchRelationOptions({});", quote(&target.target_url)));
        w.close("}");
    }

    w.blank();
    w.open("export function clearRelationOptionCache(): void {");
    w.line("optionCache.clear();");
    w.close("}");

    Some(w.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RelationType;

    #[test]
    fn test_absent_without_relations() {
        assert!(generate_relations_helper(&FeatureConfig::new("Product"), &[]).is_none());
    }

    #[test]
    fn test_one_loader_per_target() {
        let relations = vec![
            EntityRelation::new("r1").with_target("User").with_field_name("owner"),
            EntityRelation::new("r2")
                .with_type(RelationType::OneToOne)
                .with_target("User")
                .with_field_name("editor"),
            EntityRelation::new("r3").with_target("Category"),
        ];
        let out = generate_relations_helper(&FeatureConfig::new("Product"), &relations).unwrap();
        assert_eq!(out.matches("export function loadUserOptions()").count(), 1);
        assert!(out.contains("return fetchRelationOptions('/api/Users');"));
        assert!(out.contains("return fetchRelationOptions('/api/Categories');"));
        assert!(out.contains("export function clearRelationOptionCache(): void {"));
        assert!(out.contains("const optionCache = new Map<string, Promise<RelationOption[]>>();"));
    }
}
