use projectflow::{
    error::{AppError, AppResult},
    resolver::{EntityLookup, parse_id_list, resolve_ids},
};

struct Staff(Vec<i32>);

impl EntityLookup for Staff {
    type Entity = i32;

    fn find_by_ids(&mut self, ids: &[i32]) -> AppResult<Vec<i32>> {
        Ok(self.0.iter().copied().filter(|id| ids.contains(id)).collect())
    }
}

fn message(err: AppError) -> String {
    match err {
        AppError::Validation { message, .. } => message,
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn resolves_every_listed_id() {
    let mut staff = Staff(vec![1, 2, 3]);
    let mut found = resolve_ids(&mut staff, "assignee_ids", " 2 , 1 ").unwrap();
    found.sort();
    assert_eq!(found, vec![1, 2]);
}

#[test]
fn rejects_empty_input() {
    let mut staff = Staff(vec![1]);
    for raw in ["", "   ", ",", " , ,"] {
        let err = resolve_ids(&mut staff, "member_ids", raw).unwrap_err();
        assert_eq!(
            message(err),
            "Member IDs cannot be empty. Please enter valid IDs."
        );
    }
}

#[test]
fn one_bad_token_rejects_the_list() {
    let mut staff = Staff(vec![1, 2]);
    let err = resolve_ids(&mut staff, "member_ids", "1,2,x").unwrap_err();
    assert_eq!(err.field_name(), Some("member_ids"));
    assert_eq!(message(err), "All IDs must be valid integers.");
}

#[test]
fn unknown_id_rejects_the_list() {
    let mut staff = Staff(vec![1, 2]);
    let err = resolve_ids(&mut staff, "member_ids", "1,999999").unwrap_err();
    assert_eq!(
        message(err),
        "One or more member IDs are invalid. Please check the IDs."
    );
}

#[test]
fn duplicates_collapse() {
    assert_eq!(parse_id_list("member_ids", "3,1,3").unwrap(), vec![3, 1]);
    let mut staff = Staff(vec![3]);
    assert_eq!(resolve_ids(&mut staff, "member_ids", "3, 3").unwrap(), vec![3]);
}
