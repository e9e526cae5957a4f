use super::*;

#[test]
fn task_list_default_is_empty() {
    let list = TaskList::default();
    assert!(list.items.is_empty());
    assert_eq!(list.remaining(), 0);
}

#[test]
fn add_trims_title_and_appends() {
    let mut list = TaskList::default();
    list.add("  write docs ").unwrap();
    list.add("ship").unwrap();
    let titles: Vec<&str> = list.items.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["write docs", "ship"]);
    assert_eq!(list.remaining(), 2);
}

#[test]
fn add_ignores_blank_titles() {
    let mut list = TaskList::default();
    assert!(list.add("   ").is_none());
    assert!(list.items.is_empty());
}

#[test]
fn toggle_flips_done_and_updates_remaining() {
    let mut list = TaskList::default();
    let id = list.add("a").unwrap();
    list.add("b").unwrap();
    list.toggle(id);
    assert!(list.items[0].done);
    assert_eq!(list.remaining(), 1);
    list.toggle(id);
    assert_eq!(list.remaining(), 2);
}

#[test]
fn toggle_and_remove_ignore_unknown_ids() {
    let mut list = TaskList::default();
    list.add("a").unwrap();
    let before = list.clone();
    list.toggle(Uuid::new_v4());
    list.remove(Uuid::new_v4());
    assert_eq!(list, before);
}

#[test]
fn remove_drops_only_matching_task() {
    let mut list = TaskList::default();
    let a = list.add("a").unwrap();
    list.add("b").unwrap();
    list.remove(a);
    assert_eq!(list.items.len(), 1);
    assert_eq!(list.items[0].title, "b");
}
