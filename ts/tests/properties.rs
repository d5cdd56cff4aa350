//! Property tests over random action sequences

use std::collections::HashSet;

use proptest::prelude::*;
use todostore::{Action, AppState, Filter, Store, TaskId, selectors};

#[derive(Debug, Clone)]
enum Op {
    Add(String),
    Toggle(usize),
    Delete(usize),
    Edit(usize, String),
    ToggleAll(bool),
    ClearCompleted,
    SetFilter(Filter),
    Unknown,
}

fn title() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z ]{0,12}",
        Just("   ".to_string()),
        Just(String::new()),
        "  [a-z]{1,5}  ",
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => title().prop_map(Op::Add),
        2 => any::<usize>().prop_map(Op::Toggle),
        1 => any::<usize>().prop_map(Op::Delete),
        2 => (any::<usize>(), title()).prop_map(|(i, t)| Op::Edit(i, t)),
        1 => any::<bool>().prop_map(Op::ToggleAll),
        1 => Just(Op::ClearCompleted),
        1 => prop_oneof![Just(Filter::All), Just(Filter::Active), Just(Filter::Completed)].prop_map(Op::SetFilter),
        1 => Just(Op::Unknown),
    ]
}

fn pick(state: &AppState, index: usize) -> Option<TaskId> {
    if state.todos.is_empty() {
        None
    } else {
        Some(state.todos[index % state.todos.len()].id.clone())
    }
}

fn to_action(state: &AppState, op: &Op) -> Option<Action> {
    Some(match op {
        Op::Add(t) => Action::add(t.clone()),
        Op::Toggle(i) => Action::ToggleTodo(pick(state, *i)?),
        Op::Delete(i) => Action::DeleteTodo(pick(state, *i)?),
        Op::Edit(i, t) => Action::edit(pick(state, *i)?, t.clone()),
        Op::ToggleAll(b) => Action::ToggleAll(*b),
        Op::ClearCompleted => Action::ClearCompleted,
        Op::SetFilter(f) => Action::SetFilter(*f),
        Op::Unknown => Action::toggle("no-such-task"),
    })
}

fn run(ops: &[Op]) -> Store {
    let mut store = Store::default();
    for op in ops {
        if let Some(action) = to_action(&store.state(), op) {
            store.dispatch(action);
        }
    }
    store
}

proptest! {
    #[test]
    fn ids_stay_unique(ops in prop::collection::vec(op(), 0..60)) {
        let store = run(&ops);
        let ids: HashSet<_> = store.all_todos().iter().map(|t| t.id.clone()).collect();
        prop_assert_eq!(ids.len(), store.all_todos().len());
    }

    #[test]
    fn adds_get_distinct_ids(titles in prop::collection::vec("[a-z]{1,6}", 1..40)) {
        let mut store = Store::default();
        let ids: Vec<TaskId> = titles.iter().filter_map(|t| store.add_todo(t)).collect();
        let unique: HashSet<_> = ids.iter().collect();
        prop_assert_eq!(unique.len(), titles.len());
    }

    #[test]
    fn no_blank_titles(ops in prop::collection::vec(op(), 0..60)) {
        let store = run(&ops);
        for task in store.all_todos() {
            prop_assert!(!task.title.trim().is_empty());
            prop_assert_eq!(task.title.trim(), task.title.as_str());
        }
    }

    #[test]
    fn filters_partition_tasks(ops in prop::collection::vec(op(), 0..60)) {
        let store = run(&ops);
        let state = store.state();

        let active: HashSet<_> = selectors::todos_matching(&state, Filter::Active).iter().map(|t| t.id.clone()).collect();
        let completed: HashSet<_> = selectors::todos_matching(&state, Filter::Completed).iter().map(|t| t.id.clone()).collect();
        let all: HashSet<_> = state.todos.iter().map(|t| t.id.clone()).collect();

        prop_assert!(active.is_disjoint(&completed));
        prop_assert_eq!(active.union(&completed).cloned().collect::<HashSet<_>>(), all);
        prop_assert_eq!(store.active_count() + store.completed_count(), state.todos.len());
    }

    #[test]
    fn toggle_twice_restores(ops in prop::collection::vec(op(), 1..40), index in any::<usize>()) {
        let mut store = run(&ops);
        if let Some(id) = pick(&store.state(), index) {
            let before = store.state().get(&id).map(|t| t.completed);
            store.toggle_todo(&id);
            store.toggle_todo(&id);
            prop_assert_eq!(store.state().get(&id).map(|t| t.completed), before);
        }
    }

    #[test]
    fn all_completed_matches_definition(ops in prop::collection::vec(op(), 0..60)) {
        let store = run(&ops);
        let expected = !store.all_todos().is_empty() && store.completed_count() == store.all_todos().len();
        prop_assert_eq!(store.all_completed(), expected);
    }

    #[test]
    fn filtered_view_follows_filter(ops in prop::collection::vec(op(), 0..60)) {
        let store = run(&ops);
        let filter = store.filter();
        let visible = store.filtered_todos();
        prop_assert!(visible.iter().all(|t| filter.accepts(t.completed)));
        let expected = store.all_todos().iter().filter(|t| filter.accepts(t.completed)).count();
        prop_assert_eq!(visible.len(), expected);
    }
}

#[test]
fn edit_to_blank_removes_task() {
    let mut store = Store::default();
    let id = store.add_todo("Task").unwrap();
    store.edit_todo(&id, "   ");
    assert!(store.all_todos().is_empty());
    assert!(store.state().get(&id).is_none());
}

#[test]
fn all_completed_empty_is_false() {
    let store = Store::default();
    assert!(!store.all_completed());
}
