use chrono::NaiveDateTime;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use smart_agenda_shared::cache::Mutation;
use smart_agenda_shared::format;

use crate::Route;
use crate::components::toast::use_toast;
use crate::hooks::{use_appointment, use_query_client};
use crate::services;

const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Properties, PartialEq)]
pub struct AppointmentDetailProps {
    pub organization_id: String,
    pub id: String,
}

/// Read-only view of one appointment, with rescheduling.
#[function_component(AppointmentDetailPage)]
pub fn appointment_detail_page(props: &AppointmentDetailProps) -> Html {
    let appointment = use_appointment(&props.organization_id, &props.id);
    let client = use_query_client();
    let toast = use_toast();
    let new_date = use_state(String::new);
    let error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let oninput = {
        let new_date = new_date.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            new_date.set(input.value());
        })
    };

    let onsubmit = {
        let new_date = new_date.clone();
        let error = error.clone();
        let saving = saving.clone();
        let organization_id = props.organization_id.clone();
        let id = props.id.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Ok(date) = NaiveDateTime::parse_from_str(&new_date, INPUT_FORMAT) else {
                error.set(Some("Informe uma data válida".to_string()));
                return;
            };
            error.set(None);
            saving.set(true);

            let saving = saving.clone();
            let new_date = new_date.clone();
            let client = client.clone();
            let toast = toast.clone();
            let organization_id = organization_id.clone();
            let id = id.clone();
            spawn_local(async move {
                match services::appointments::reschedule(organization_id.clone(), id, date.and_utc()).await {
                    Ok(()) => {
                        client.apply(&Mutation::Appointment { organization_id });
                        toast.success("Agendamento reagendado");
                        new_date.set(String::new());
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "reschedule failed");
                        toast.error("Erro ao reagendar", Some(e.user_message()));
                    }
                }
                saving.set(false);
            });
        })
    };

    let back = Route::Agenda {
        organization_id: props.organization_id.clone(),
    };

    let details = match (&appointment.data, &appointment.error) {
        (Some(a), _) => {
            let row = |label: &'static str, value: String| html! {
                <div class="flex justify-between py-2">
                    <dt class="text-sm text-gray-500">{label}</dt>
                    <dd class="text-sm text-gray-900">{value}</dd>
                </div>
            };
            html! {
                <dl class="divide-y divide-gray-100">
                    {row("Data", format::date_br(a.date.date_naive()))}
                    {row("Horário", format::time_br(a.date.time()))}
                    {row("Status", a.status.label().to_string())}
                    {row("Cliente", a.customer_phone.clone())}
                    {row("Descrição", if a.description.is_empty() { "-".to_string() } else { a.description.clone() })}
                </dl>
            }
        }
        (None, Some(e)) => html! {
            <div class="bg-red-50 border border-red-200 text-red-700 px-4 py-3 rounded">{e.user_message()}</div>
        },
        (None, None) => html! { <p class="text-sm text-gray-500">{"Carregando..."}</p> },
    };

    html! {
        <div class="p-6 max-w-2xl space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold text-gray-900">{"Agendamento"}</h1>
                <Link<Route> to={back} classes="text-sm text-blue-600 hover:underline">{"Voltar para a agenda"}</Link<Route>>
            </div>

            <div class="bg-white rounded-lg border border-gray-200 p-6">{details}</div>

            if appointment.data.as_ref().is_some_and(|a| a.status.is_open()) {
                <form class="bg-white rounded-lg border border-gray-200 p-6 space-y-4" {onsubmit}>
                    <label for="reschedule" class="block text-sm font-medium text-gray-700">{"Reagendar para"}</label>
                    <input
                        id="reschedule"
                        type="datetime-local"
                        class="block w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-blue-500 focus:border-blue-500 sm:text-sm"
                        value={(*new_date).clone()}
                        {oninput}
                    />
                    if let Some(message) = (*error).clone() {
                        <p class="text-sm text-red-600">{message}</p>
                    }
                    <button type="submit" disabled={*saving} class="px-4 py-2 rounded-md bg-blue-600 text-white text-sm hover:bg-blue-700 disabled:opacity-50">
                        {if *saving { "Salvando..." } else { "Reagendar" }}
                    </button>
                </form>
            }
        </div>
    }
}
