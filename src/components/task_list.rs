//! Placeholder task list panel for the dashboard.

use leptos::prelude::*;

use crate::state::tasks::TaskList;

/// In-memory task list with add, toggle, and remove.
#[component]
pub fn TaskListPanel() -> impl IntoView {
    let tasks = RwSignal::new(TaskList::default());
    let draft = RwSignal::new(String::new());

    let do_add = move || {
        let title = draft.get();
        let mut added = false;
        tasks.update(|list| added = list.add(&title).is_some());
        if added {
            draft.set(String::new());
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        do_add();
    };

    let remaining = move || {
        let n = tasks.with(TaskList::remaining);
        if n == 1 { "1 task left".to_owned() } else { format!("{n} tasks left") }
    };

    view! {
        <section class="task-list">
            <header class="task-list__header">
                <h2>"Tasks"</h2>
                <span class="task-list__remaining">{remaining}</span>
            </header>

            <form class="task-list__form" on:submit=on_submit>
                <input
                    class="task-list__input"
                    type="text"
                    placeholder="Add a task..."
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                />
                <button class="btn btn--primary" type="submit" disabled=move || draft.get().trim().is_empty()>
                    "Add"
                </button>
            </form>

            <ul class="task-list__items">
                <For
                    each=move || tasks.get().items
                    key=|task| (task.id, task.done)
                    children=move |task| {
                        let id = task.id;
                        let class = if task.done { "task-list__item task-list__item--done" } else { "task-list__item" };
                        view! {
                            <li class=class>
                                <label>
                                    <input
                                        type="checkbox"
                                        prop:checked=task.done
                                        on:change=move |_| tasks.update(|list| list.toggle(id))
                                    />
                                    <span class="task-list__title">{task.title}</span>
                                </label>
                                <button
                                    class="task-list__remove"
                                    type="button"
                                    title="Remove task"
                                    on:click=move |_| tasks.update(|list| list.remove(id))
                                >
                                    "\u{00d7}"
                                </button>
                            </li>
                        }
                    }
                />
            </ul>

            <Show when=move || tasks.with(|list| list.items.is_empty())>
                <p class="task-list__empty">"No tasks yet"</p>
            </Show>
        </section>
    }
}
