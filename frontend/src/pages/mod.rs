use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

pub mod agenda;
pub mod appointment_detail;
pub mod contacts;
pub mod home;
pub mod new_organization;
pub mod schedule;
pub mod service_catalog;
pub mod space_of_service;

/// Value of the input or textarea that fired the event.
pub(crate) fn input_value(e: &InputEvent) -> String {
    if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = e.target_dyn_into::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}
