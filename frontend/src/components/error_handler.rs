use gloo::events::EventListener;
use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{ErrorEvent, PromiseRejectionEvent};
use yew::prelude::*;

use smart_agenda_shared::session::LOGIN_ROUTE;

use super::toast::use_toast;
use crate::config::UNAUTHORIZED_REDIRECT_MS;
use crate::services::{hard_redirect, with_session};

const GENERIC_ERROR: &str = "Algo deu errado. Tente novamente.";
const SESSION_EXPIRED: &str = "Sua sessão expirou. Redirecionando...";

/// HTTP status carried by a rejection reason, either as `reason.status`
/// or `reason.response.status`.
fn rejection_status(reason: &JsValue) -> Option<u16> {
    let get = |target: &JsValue, key: &str| js_sys::Reflect::get(target, &JsValue::from_str(key)).ok();
    let direct = get(reason, "status").and_then(|v| v.as_f64());
    let nested = || {
        get(reason, "response")
            .filter(|r| r.is_object())
            .and_then(|r| get(&r, "status"))
            .and_then(|v| v.as_f64())
    };
    direct.or_else(nested).map(|status| status as u16)
}

/// Window-level listeners for anything that escaped the views.
#[function_component(GlobalErrorHandler)]
pub fn global_error_handler() -> Html {
    let toast = use_toast();

    use_effect_with((), move |_| {
        let listeners = web_sys::window().map(|window| {
            let on_error = {
                let toast = toast.clone();
                EventListener::new(&window, "error", move |event| {
                    if let Some(event) = event.dyn_ref::<ErrorEvent>() {
                        tracing::error!(message = %event.message(), "uncaught error");
                    }
                    toast.error(GENERIC_ERROR, None);
                })
            };
            let on_rejection = EventListener::new(&window, "unhandledrejection", move |event| {
                let status = event
                    .dyn_ref::<PromiseRejectionEvent>()
                    .and_then(|event| rejection_status(&event.reason()));
                if status == Some(401) {
                    with_session(|session| session.clear());
                    toast.error(SESSION_EXPIRED, None);
                    Timeout::new(UNAUTHORIZED_REDIRECT_MS, || hard_redirect(LOGIN_ROUTE)).forget();
                } else {
                    tracing::error!(?status, "unhandled rejection");
                    toast.error(GENERIC_ERROR, None);
                }
            });
            (on_error, on_rejection)
        });
        move || drop(listeners)
    });

    html! {}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_status_from_rejection_reason() {
        let reason = js_sys::Object::new();
        js_sys::Reflect::set(&reason, &"status".into(), &JsValue::from_f64(401.0)).unwrap();
        assert_eq!(rejection_status(&reason.into()), Some(401));

        let response = js_sys::Object::new();
        js_sys::Reflect::set(&response, &"status".into(), &JsValue::from_f64(500.0)).unwrap();
        let reason = js_sys::Object::new();
        js_sys::Reflect::set(&reason, &"response".into(), &response).unwrap();
        assert_eq!(rejection_status(&reason.into()), Some(500));

        assert_eq!(rejection_status(&JsValue::from_str("boom")), None);
    }
}
