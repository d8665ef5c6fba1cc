// Agenda - the organization's appointments for one month

use chrono::Datelike;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;
use yew_router::prelude::*;

use smart_agenda_shared::cache::Mutation;
use smart_agenda_shared::endpoints::appointments::Transition;
use smart_agenda_shared::{Appointment, format};

use crate::Route;
use crate::components::toast::use_toast;
use crate::hooks::{use_appointments_by_month, use_query_client};
use crate::services;

#[derive(Properties, PartialEq)]
pub struct AgendaPageProps {
    pub organization_id: String,
}

#[function_component(AgendaPage)]
pub fn agenda_page(props: &AgendaPageProps) -> Html {
    let today = chrono::Local::now().date_naive();
    let month = use_state(|| today.month());
    let year = use_state(|| today.year());
    let appointments = use_appointments_by_month(&props.organization_id, *month, *year);
    let client = use_query_client();
    let toast = use_toast();

    let on_month = {
        let month = month.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(value) = select.value().parse::<u32>() {
                month.set(value);
            }
        })
    };
    let on_year = {
        let year = year.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(value) = select.value().parse::<i32>() {
                year.set(value);
            }
        })
    };

    let on_transition = {
        let organization_id = props.organization_id.clone();
        Callback::from(move |(id, transition): (String, Transition)| {
            let organization_id = organization_id.clone();
            let client = client.clone();
            let toast = toast.clone();
            spawn_local(async move {
                match services::appointments::transition(organization_id.clone(), id, transition).await {
                    Ok(()) => {
                        client.apply(&Mutation::Appointment { organization_id });
                        toast.success(match transition {
                            Transition::Cancel => "Agendamento cancelado",
                            Transition::Complete => "Agendamento finalizado",
                            Transition::Delete => "Agendamento excluído",
                        });
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, ?transition, "appointment transition failed");
                        toast.error("Erro ao atualizar agendamento", Some(e.user_message()));
                    }
                }
            });
        })
    };

    let list = appointments.data.clone().unwrap_or_default();
    let rows = list
        .into_iter()
        .map(|appointment| {
            let key = appointment.id.clone();
            html! {
                <AppointmentRow
                    {key}
                    organization_id={props.organization_id.clone()}
                    {appointment}
                    on_transition={on_transition.clone()}
                />
            }
        })
        .collect::<Vec<Html>>();

    let select_class = "px-3 py-2 border border-gray-300 rounded-md bg-white text-sm focus:outline-none focus:ring-blue-500 focus:border-blue-500";

    html! {
        <div class="p-6 space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold text-gray-900">{"Agenda"}</h1>
                <div class="flex gap-2">
                    <select class={select_class} onchange={on_month}>
                        {format::MONTH_NAMES.iter().enumerate().map(|(i, name)| {
                            let value = i as u32 + 1;
                            html! { <option value={value.to_string()} selected={value == *month}>{*name}</option> }
                        }).collect::<Html>()}
                    </select>
                    <select class={select_class} onchange={on_year}>
                        {format::agenda_years(today.year()).iter().map(|y| html! {
                            <option value={y.to_string()} selected={*y == *year}>{y.to_string()}</option>
                        }).collect::<Html>()}
                    </select>
                </div>
            </div>

            if let Some(error) = &appointments.error {
                <div class="bg-red-50 border border-red-200 text-red-700 px-4 py-3 rounded">{error.user_message()}</div>
            }

            <div class="bg-white rounded-lg border border-gray-200 overflow-hidden">
                if appointments.loading && rows.is_empty() {
                    <p class="p-6 text-center text-sm text-gray-500">{"Carregando..."}</p>
                } else if rows.is_empty() {
                    <p class="p-6 text-center text-sm text-gray-500">{"Nenhum agendamento neste mês"}</p>
                } else {
                    <table class="min-w-full divide-y divide-gray-200">
                        <thead class="bg-gray-50">
                            <tr>
                                <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">{"Data"}</th>
                                <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">{"Descrição"}</th>
                                <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">{"Status"}</th>
                                <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">{"Cliente"}</th>
                                <th class="px-6 py-3 text-right text-xs font-medium text-gray-500 uppercase">{"Ações"}</th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-gray-200">{rows}</tbody>
                    </table>
                }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct AppointmentRowProps {
    organization_id: String,
    appointment: Appointment,
    on_transition: Callback<(String, Transition)>,
}

#[function_component(AppointmentRow)]
fn appointment_row(props: &AppointmentRowProps) -> Html {
    let appointment = &props.appointment;
    let action = |transition: Transition| {
        let id = appointment.id.clone();
        let on_transition = props.on_transition.clone();
        Callback::from(move |_: MouseEvent| on_transition.emit((id.clone(), transition)))
    };
    let description = if appointment.description.is_empty() {
        "-".to_string()
    } else {
        appointment.description.clone()
    };
    let open = appointment.status.is_open();

    html! {
        <tr class="hover:bg-gray-50">
            <td class="px-6 py-4 text-sm text-gray-900">
                <Link<Route>
                    to={Route::AppointmentDetail {
                        organization_id: props.organization_id.clone(),
                        id: appointment.id.clone(),
                    }}
                    classes="text-blue-600 hover:underline"
                >
                    {format::date_br(appointment.date.date_naive())}
                </Link<Route>>
            </td>
            <td class="px-6 py-4 text-sm text-gray-600">{description}</td>
            <td class="px-6 py-4 text-sm text-gray-600">{appointment.status.label()}</td>
            <td class="px-6 py-4 text-sm text-gray-600">{appointment.customer_phone.clone()}</td>
            <td class="px-6 py-4 text-sm text-right space-x-2">
                if open {
                    <button onclick={action(Transition::Cancel)} class="text-yellow-700 hover:underline">{"Cancelar"}</button>
                    <button onclick={action(Transition::Complete)} class="text-green-700 hover:underline">{"Finalizar"}</button>
                }
                <button onclick={action(Transition::Delete)} class="text-red-700 hover:underline">{"Excluir"}</button>
            </td>
        </tr>
    }
}
