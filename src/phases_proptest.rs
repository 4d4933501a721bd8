//! Property-based tests for collection resolution.
//!
//! Random document maps are resolved through the full stage and checked for
//! membership, ordering and idempotence invariants.

#[cfg(test)]
mod proptest_tests {
    use crate::config::{CollectionOptions, CollectionsConfig};
    use crate::document::{Document, Files};
    use crate::metadata::Metadata;
    use crate::stage::{Collections, Plugin, StageSettings};
    use proptest::prelude::*;
    use serde_json::{json, Value};

    const NAMES: [&str; 4] = ["news", "blog", "notes", "misc"];

    #[derive(Debug, Clone)]
    struct DocSpec {
        path: String,
        declared: Vec<usize>,
        rank: Option<i64>,
    }

    fn doc_spec() -> impl Strategy<Value = DocSpec> {
        (
            prop::sample::select(vec!["posts", "pages", "drafts"]),
            "[a-z]{1,6}",
            prop::collection::vec(0usize..NAMES.len(), 0..3),
            prop::option::of(0i64..5),
        )
            .prop_map(|(dir, stem, declared, rank)| DocSpec {
                path: format!("{}/{}.md", dir, stem),
                declared,
                rank,
            })
    }

    fn build_files(specs: &[DocSpec]) -> Files {
        let mut files = Files::new();
        for spec in specs {
            let mut doc = Document::from_string(&spec.path);
            if !spec.declared.is_empty() {
                let names: Vec<Value> = spec.declared.iter().map(|&i| json!(NAMES[i])).collect();
                doc = doc.with_meta("collection", Value::Array(names));
            }
            if let Some(rank) = spec.rank {
                doc = doc.with_meta("rank", rank);
            }
            files.insert(&spec.path, doc);
        }
        files
    }

    fn stage() -> Collections {
        let config = CollectionsConfig::new()
            .collection("posts", CollectionOptions::new().pattern("posts/*.md").sort_by("rank:asc"))
            .collection("limited", CollectionOptions::new().pattern("**/*.md").limit(3))
            .collection("everything", CollectionOptions::new().patterns(["**/*.md", "!drafts/**"]));
        Collections::new(&config, StageSettings::default()).unwrap()
    }

    proptest! {
        /// Property: running the stage twice yields identical documents and collections
        #[test]
        fn resolution_is_idempotent(specs in prop::collection::vec(doc_spec(), 0..12)) {
            let stage = stage();
            let mut files = build_files(&specs);
            let mut metadata = Metadata::new();

            stage.run(&mut files, &mut metadata).unwrap();
            let files_after_first = files.clone();
            let first = metadata.to_json(&files);

            stage.run(&mut files, &mut metadata).unwrap();
            prop_assert_eq!(&files_after_first, &files);
            prop_assert_eq!(first, metadata.to_json(&files));
        }

        /// Property: a declared collection lists the document exactly once
        #[test]
        fn declared_membership_is_honored(specs in prop::collection::vec(doc_spec(), 1..12)) {
            let stage = stage();
            let mut files = build_files(&specs);
            let mut metadata = Metadata::new();
            stage.run(&mut files, &mut metadata).unwrap();

            for (path, doc) in files.iter() {
                for name in &doc.collection {
                    let collection = metadata.collection(name).unwrap();
                    let occurrences = collection.items().iter().filter(|p| p.as_str() == path).count();
                    if name != "limited" {
                        prop_assert_eq!(occurrences, 1, "{} in {}", path, name);
                    } else {
                        prop_assert!(occurrences <= 1);
                    }
                }
            }
        }

        /// Property: ascending key sort puts missing values first and never decreases
        #[test]
        fn ascending_sort_is_ordered(specs in prop::collection::vec(doc_spec(), 1..12)) {
            let stage = stage();
            let mut files = build_files(&specs);
            let mut metadata = Metadata::new();
            stage.run(&mut files, &mut metadata).unwrap();

            let ranked: Vec<(i64, &str)> = metadata
                .collection("posts")
                .unwrap()
                .documents(&files)
                .map(|doc| (doc.get("rank").and_then(Value::as_i64).unwrap_or(0), doc.path()))
                .collect();
            prop_assert!(ranked.windows(2).all(|w| w[0].0 <= w[1].0), "{:?}", ranked);
            // equal ranks, including missing and zero, keep path order
            prop_assert!(
                ranked.windows(2).all(|w| w[0].0 != w[1].0 || w[0].1 < w[1].1),
                "{:?}",
                ranked
            );
        }

        /// Property: limit caps the collection size and links span the kept items
        #[test]
        fn limit_caps_and_links_are_consistent(specs in prop::collection::vec(doc_spec(), 0..12)) {
            let stage = stage();
            let mut files = build_files(&specs);
            let mut metadata = Metadata::new();
            stage.run(&mut files, &mut metadata).unwrap();

            let limited = metadata.collection("limited").unwrap();
            prop_assert!(limited.len() <= 3);
            for (i, path) in limited.items().iter().enumerate() {
                let links = files.get(path).unwrap().links("limited").unwrap();
                prop_assert_eq!(links.first.as_ref(), limited.items().first());
                prop_assert_eq!(links.last.as_ref(), limited.items().last());
                prop_assert_eq!(links.previous.is_none(), i == 0);
                prop_assert_eq!(links.next.is_none(), i + 1 == limited.len());
            }
        }
    }
}
