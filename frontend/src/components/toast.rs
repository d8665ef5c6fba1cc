use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::config::TOAST_DURATION_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub title: String,
    pub description: Option<String>,
}

pub enum ToastAction {
    Push(Toast),
    Dismiss(u64),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastStack {
    toasts: Vec<Toast>,
}

impl Reducible for ToastStack {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut stack = (*self).clone();
        match action {
            ToastAction::Push(toast) => stack.toasts.push(toast),
            ToastAction::Dismiss(id) => stack.toasts.retain(|t| t.id != id),
        }
        Rc::new(stack)
    }
}

/// Handle for raising notifications from any component.
#[derive(Clone, PartialEq)]
pub struct ToastContext {
    push: Callback<Toast>,
}

impl ToastContext {
    pub fn success(&self, title: impl Into<String>) {
        self.push.emit(Toast {
            id: 0,
            kind: ToastKind::Success,
            title: title.into(),
            description: None,
        });
    }

    pub fn error(&self, title: impl Into<String>, description: Option<String>) {
        self.push.emit(Toast {
            id: 0,
            kind: ToastKind::Error,
            title: title.into(),
            description,
        });
    }
}

#[hook]
pub fn use_toast() -> ToastContext {
    use_context::<ToastContext>().expect("ToastContext not found")
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let stack = use_reducer(ToastStack::default);

    let next_id = use_mut_ref(|| 0u64);

    let push = {
        let stack = stack.clone();
        Callback::from(move |mut toast: Toast| {
            *next_id.borrow_mut() += 1;
            toast.id = *next_id.borrow();
            let id = toast.id;
            stack.dispatch(ToastAction::Push(toast));

            let stack = stack.clone();
            Timeout::new(TOAST_DURATION_MS, move || stack.dispatch(ToastAction::Dismiss(id))).forget();
        })
    };
    let context = use_memo((), move |_| ToastContext { push });

    html! {
        <ContextProvider<ToastContext> context={(*context).clone()}>
            {props.children.clone()}
            <div class="fixed bottom-4 right-4 z-50 flex flex-col space-y-2 w-80">
                { for stack.toasts.iter().map(|toast| {
                    let dismiss = {
                        let stack = stack.clone();
                        let id = toast.id;
                        Callback::from(move |_| stack.dispatch(ToastAction::Dismiss(id)))
                    };
                    let color = match toast.kind {
                        ToastKind::Success => "bg-green-50 border-green-300 text-green-800",
                        ToastKind::Error => "bg-red-50 border-red-300 text-red-800",
                    };
                    html! {
                        <div key={toast.id.to_string()} class={classes!("border", "rounded-lg", "shadow", "px-4", "py-3", "flex", "justify-between", color)}>
                            <div>
                                <p class="font-semibold text-sm">{toast.title.clone()}</p>
                                if let Some(description) = &toast.description {
                                    <p class="text-sm mt-1">{description.clone()}</p>
                                }
                            </div>
                            <button class="ml-4 text-sm opacity-60 hover:opacity-100" onclick={dismiss}>{"✕"}</button>
                        </div>
                    }
                }) }
            </div>
        </ContextProvider<ToastContext>>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toast(id: u64) -> Toast {
        Toast {
            id,
            kind: ToastKind::Success,
            title: format!("toast {}", id),
            description: None,
        }
    }

    #[test]
    fn test_dismiss_removes_only_that_toast() {
        let stack = Rc::new(ToastStack::default())
            .reduce(ToastAction::Push(toast(1)))
            .reduce(ToastAction::Push(toast(2)))
            .reduce(ToastAction::Dismiss(1));
        assert_eq!(stack.toasts, vec![toast(2)]);
    }
}
