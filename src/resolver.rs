//! Resolution of free-text comma-separated id lists into entity sets.
//!
//! Used for team members and task assignees. Parsing is all-or-nothing:
//! one bad token or one unknown id rejects the whole list.

use crate::error::{AppError, AppResult};

/// Loads every entity whose id is in `ids`. Unknown ids are simply absent
/// from the result.
pub trait EntityLookup {
    type Entity;

    fn find_by_ids(&mut self, ids: &[i32]) -> AppResult<Vec<Self::Entity>>;
}

/// Human label for an id-list field, `member_ids` -> `Member`.
fn field_label(field: &str) -> String {
    let spaced = field.trim_end_matches("_ids").replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => spaced,
    }
}

fn empty_error(field: &str) -> AppError {
    AppError::field(
        field,
        format!(
            "{} IDs cannot be empty. Please enter valid IDs.",
            field_label(field)
        ),
    )
}

/// Splits `raw` on commas into unique ids, keeping first-seen order.
pub fn parse_id_list(field: &str, raw: &str) -> AppResult<Vec<i32>> {
    if raw.trim().is_empty() {
        return Err(empty_error(field));
    }

    let tokens: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect();
    if tokens.is_empty() {
        return Err(empty_error(field));
    }

    let mut ids = Vec::with_capacity(tokens.len());
    for token in tokens {
        let id = token
            .parse::<i32>()
            .map_err(|_| AppError::field(field, "All IDs must be valid integers."))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Parses `raw` and loads the referenced entities, failing unless every id
/// resolves.
pub fn resolve_ids<L>(lookup: &mut L, field: &str, raw: &str) -> AppResult<Vec<L::Entity>>
where
    L: EntityLookup + ?Sized,
{
    let ids = parse_id_list(field, raw)?;
    let found = lookup.find_by_ids(&ids)?;
    if found.len() != ids.len() {
        tracing::debug!(field, requested = ids.len(), found = found.len(), "Unresolved ids");
        return Err(AppError::field(
            field,
            format!(
                "One or more {} IDs are invalid. Please check the IDs.",
                field_label(field).to_lowercase()
            ),
        ));
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    struct Directory(BTreeMap<i32, &'static str>);

    impl EntityLookup for Directory {
        type Entity = (i32, &'static str);

        fn find_by_ids(&mut self, ids: &[i32]) -> AppResult<Vec<Self::Entity>> {
            Ok(self
                .0
                .iter()
                .filter(|(id, _)| ids.contains(id))
                .map(|(id, name)| (*id, *name))
                .collect())
        }
    }

    fn directory() -> Directory {
        Directory(BTreeMap::from([(1, "ann"), (2, "bob"), (3, "cid")]))
    }

    fn message(err: AppError) -> String {
        match err {
            AppError::Validation { message, .. } => message,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_and_blank_input() {
        for raw in ["", "   ", ",", " , ,"] {
            let err = resolve_ids(&mut directory(), "member_ids", raw).unwrap_err();
            assert_eq!(err.field_name(), Some("member_ids"));
            assert_eq!(
                message(err),
                "Member IDs cannot be empty. Please enter valid IDs."
            );
        }
    }

    #[test]
    fn rejects_any_non_integer_token() {
        let err = resolve_ids(&mut directory(), "assignee_ids", "1,2,x").unwrap_err();
        assert_eq!(message(err), "All IDs must be valid integers.");

        assert!(parse_id_list("assignee_ids", "1.5").is_err());
    }

    #[test]
    fn rejects_unknown_ids() {
        let err = resolve_ids(&mut directory(), "member_ids", "1,999999").unwrap_err();
        assert_eq!(err.field_name(), Some("member_ids"));
        assert_eq!(
            message(err),
            "One or more member IDs are invalid. Please check the IDs."
        );
    }

    #[test]
    fn messages_name_the_field_label() {
        let err = resolve_ids(&mut directory(), "assignee_ids", "4").unwrap_err();
        assert_eq!(
            message(err),
            "One or more assignee IDs are invalid. Please check the IDs."
        );
        let err = resolve_ids(&mut directory(), "assignee_ids", " ").unwrap_err();
        assert_eq!(
            message(err),
            "Assignee IDs cannot be empty. Please enter valid IDs."
        );
    }

    #[test]
    fn resolves_exactly_the_requested_entities() {
        let found = resolve_ids(&mut directory(), "member_ids", " 1 , 2 ,").unwrap();
        assert_eq!(found, vec![(1, "ann"), (2, "bob")]);
    }

    #[test]
    fn repeated_ids_count_once() {
        assert_eq!(parse_id_list("member_ids", "3, 1, 3").unwrap(), vec![3, 1]);
        let found = resolve_ids(&mut directory(), "member_ids", "2,2").unwrap();
        assert_eq!(found, vec![(2, "bob")]);
    }
}
