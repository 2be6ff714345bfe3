use projectflow::pagination::{PROJECTS_PER_PAGE, Page, Paginator, TASKS_PER_PAGE};

#[test]
fn page_beyond_the_last_returns_the_last_page() {
    let tasks: Vec<i32> = (1..=14).collect();
    let page = Page::from_vec(tasks, TASKS_PER_PAGE, Some("9"));
    assert_eq!(page.items, vec![13, 14]);
    assert_eq!(page.pagination.page, 3);
    assert!(!page.pagination.has_next);
    assert!(page.pagination.has_prev);
}

#[test]
fn garbage_and_missing_pages_fall_back_to_the_first() {
    let paginator = Paginator::new(20, PROJECTS_PER_PAGE);
    assert_eq!(paginator.page_number(None), 1);
    assert_eq!(paginator.page_number(Some("abc")), 1);
    assert_eq!(paginator.page_number(Some("-4")), 1);
    assert_eq!(paginator.page_number(Some("2")), 2);
    assert_eq!(paginator.offset(2), 8);
}

#[test]
fn empty_list_has_one_empty_page() {
    let page: Page<i32> = Page::from_vec(Vec::new(), TASKS_PER_PAGE, Some("3"));
    assert!(page.items.is_empty());
    assert_eq!(page.pagination.total_pages, 1);
    assert_eq!(page.pagination.page, 1);

    let (items, meta) = page.into_parts();
    assert!(items.is_empty());
    assert_eq!(meta.total_count, Some(0));
}
