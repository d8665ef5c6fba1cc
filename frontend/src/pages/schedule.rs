// Schedule - three-step appointment booking

use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use smart_agenda_shared::booking::{BookingWizard, STEPS};
use smart_agenda_shared::cache::Mutation;
use smart_agenda_shared::calendar::CalendarState;
use smart_agenda_shared::format;
use smart_agenda_shared::{Customer, FieldErrors, SubmitError};

use crate::components::contact_select::ContactSelect;
use crate::components::multi_step::MultiStep;
use crate::components::schedule_calendar::ScheduleCalendar;
use crate::components::toast::use_toast;
use crate::hooks::{use_query_client, use_services, use_spaces};
use crate::services::ApiClient;

const BOOKING_FAILED: &str = "Erro ao criar agendamento";

#[derive(Properties, PartialEq)]
pub struct SchedulePageProps {
    pub organization_id: String,
}

#[function_component(SchedulePage)]
pub fn schedule_page(props: &SchedulePageProps) -> Html {
    let services = use_services(&props.organization_id);
    let spaces = use_spaces(&props.organization_id);
    let client = use_query_client();
    let toast = use_toast();
    let wizard = use_state(BookingWizard::new);
    let field_errors = use_state(FieldErrors::default);
    let picking_customer = use_state(|| false);
    let submitting = use_state(|| false);

    let update = |apply: fn(&mut BookingWizard, String)| {
        let wizard = wizard.clone();
        move |value: String| {
            let mut next = (*wizard).clone();
            apply(&mut next, value);
            wizard.set(next);
        }
    };
    let set_service = update(|w, v| w.service_id = v);
    let on_service = Callback::from(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        set_service(select.value());
    });
    let set_space = update(|w, v| w.space_of_service_id = v);
    let on_space = Callback::from(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        set_space(select.value());
    });
    let set_description = update(|w, v| w.description = v);
    let on_description = Callback::from(move |e: InputEvent| {
        let input: HtmlTextAreaElement = e.target_unchecked_into();
        set_description(input.value());
    });

    let on_calendar = {
        let wizard = wizard.clone();
        Callback::from(move |state: CalendarState| {
            let mut next = (*wizard).clone();
            next.set_calendar(state);
            wizard.set(next);
        })
    };

    let open_picker = {
        let picking_customer = picking_customer.clone();
        Callback::from(move |_: MouseEvent| picking_customer.set(true))
    };
    let close_picker = {
        let picking_customer = picking_customer.clone();
        Callback::from(move |_| picking_customer.set(false))
    };
    let on_customer = {
        let wizard = wizard.clone();
        let picking_customer = picking_customer.clone();
        Callback::from(move |customer: Customer| {
            let mut next = (*wizard).clone();
            next.select_customer(&customer);
            wizard.set(next);
            picking_customer.set(false);
        })
    };

    let on_next = {
        let wizard = wizard.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*wizard).clone();
            if next.next() {
                wizard.set(next);
            }
        })
    };
    let on_back = {
        let wizard = wizard.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*wizard).clone();
            if next.back() {
                wizard.set(next);
            }
        })
    };

    let on_submit = {
        let wizard = wizard.clone();
        let field_errors = field_errors.clone();
        let submitting = submitting.clone();
        let organization_id = props.organization_id.clone();

        Callback::from(move |_: MouseEvent| {
            let request = match wizard.submit(&organization_id) {
                Ok(request) => request,
                Err(SubmitError::Invalid(errors)) => {
                    tracing::debug!(?errors, "booking rejected");
                    toast.error(BOOKING_FAILED, errors.first("date").map(str::to_string));
                    field_errors.set(errors);
                    return;
                }
                Err(SubmitError::Api(e)) => {
                    toast.error(BOOKING_FAILED, Some(e.user_message()));
                    return;
                }
            };
            field_errors.set(FieldErrors::default());
            submitting.set(true);

            let wizard = wizard.clone();
            let submitting = submitting.clone();
            let client = client.clone();
            let toast = toast.clone();
            let organization_id = organization_id.clone();
            spawn_local(async move {
                match ApiClient::execute_unit(request).await {
                    Ok(()) => {
                        client.apply(&Mutation::Appointment { organization_id });
                        toast.success("Agenda criada com sucesso");
                        wizard.set(BookingWizard::new());
                    }
                    // Values stay as they are so the user can retry
                    Err(e) => {
                        tracing::warn!(error = %e, "booking failed");
                        toast.error(BOOKING_FAILED, Some(e.user_message()));
                    }
                }
                submitting.set(false);
            });
        })
    };

    let service_list = services.data.clone().unwrap_or_default();
    let space_list = spaces.data.clone().unwrap_or_default();
    let select_class = "mt-1 block w-full px-3 py-2 border border-gray-300 rounded-md bg-white focus:outline-none focus:ring-blue-500 focus:border-blue-500 sm:text-sm";
    let error_text = |field: &str| match field_errors.first(field) {
        Some(message) => html! { <p class="mt-1 text-sm text-red-600">{message.to_string()}</p> },
        None => html! {},
    };

    let body = match wizard.step() {
        1 => html! {
            <div class="space-y-4">
                <div>
                    <label for="service" class="block text-sm font-medium text-gray-700">{"Serviço"}</label>
                    <select id="service" class={select_class} onchange={on_service}>
                        <option value="" selected={wizard.service_id.is_empty()}>{"Selecione um serviço"}</option>
                        {service_list.iter().map(|s| html! {
                            <option key={s.id.clone()} value={s.id.clone()} selected={s.id == wizard.service_id}>
                                {format::service_label(&s.name, s.duration, s.price)}
                            </option>
                        }).collect::<Html>()}
                    </select>
                    {error_text("serviceId")}
                </div>
                <div>
                    <label for="space" class="block text-sm font-medium text-gray-700">{"Espaço de Serviço"}</label>
                    <select id="space" class={select_class} onchange={on_space}>
                        <option value="" selected={wizard.space_of_service_id.is_empty()}>{"Selecione um espaço"}</option>
                        {space_list.iter().map(|s| html! {
                            <option key={s.id.clone()} value={s.id.clone()} selected={s.id == wizard.space_of_service_id}>
                                {s.name.clone()}
                            </option>
                        }).collect::<Html>()}
                    </select>
                    {error_text("spaceOfServiceId")}
                </div>
                <div>
                    <span class="block text-sm font-medium text-gray-700">{"Cliente"}</span>
                    <button type="button" onclick={open_picker} class="mt-1 w-full text-left px-3 py-2 border border-gray-300 rounded-md text-sm hover:bg-gray-50">
                        {wizard.customer().map(|c| c.label.clone()).unwrap_or_else(|| "Selecionar cliente".to_string())}
                    </button>
                    {error_text("customerPhone")}
                </div>
                <div>
                    <label for="description" class="block text-sm font-medium text-gray-700">{"Observações"}</label>
                    <textarea
                        id="description"
                        rows="3"
                        class={select_class}
                        value={wizard.description.clone()}
                        oninput={on_description}
                    />
                </div>
            </div>
        },
        2 => html! {
            <>
                <ScheduleCalendar state={wizard.calendar().clone()} on_change={on_calendar} />
                {error_text("date")}
            </>
        },
        _ => {
            let summary = wizard.summary(&service_list, &space_list);
            let row = |label: &'static str, value: String| html! {
                <div class="flex justify-between py-2">
                    <dt class="text-sm text-gray-500">{label}</dt>
                    <dd class="text-sm text-gray-900">{value}</dd>
                </div>
            };
            html! {
                <dl class="divide-y divide-gray-100">
                    {row("Serviço", summary.service)}
                    {row("Espaço de Serviço", summary.space_of_service)}
                    {row("Cliente", summary.customer)}
                    {row("Data", summary.date)}
                    {row("Horário", summary.time)}
                    {row("Observações", if summary.description.is_empty() { "-".to_string() } else { summary.description })}
                </dl>
            }
        }
    };

    let busy = *submitting;

    html! {
        <div class="p-6 max-w-5xl space-y-6">
            <h1 class="text-2xl font-bold text-gray-900">{"Agendamento"}</h1>
            <MultiStep current={wizard.step()} total={STEPS} />

            <div class="bg-white rounded-lg border border-gray-200 p-6">{body}</div>

            <div class="flex justify-between">
                <button
                    type="button"
                    onclick={on_back}
                    disabled={!wizard.can_go_back() || busy}
                    class="px-4 py-2 rounded-md border border-gray-300 text-sm text-gray-700 hover:bg-gray-50 disabled:opacity-50"
                >
                    {"Voltar"}
                </button>
                if wizard.step() < STEPS {
                    <button
                        type="button"
                        onclick={on_next}
                        disabled={!wizard.can_advance()}
                        class="px-4 py-2 rounded-md bg-blue-600 text-white text-sm hover:bg-blue-700 disabled:opacity-50"
                    >
                        {"Próximo"}
                    </button>
                } else {
                    <button
                        type="button"
                        onclick={on_submit}
                        disabled={busy}
                        class="px-4 py-2 rounded-md bg-blue-600 text-white text-sm hover:bg-blue-700 disabled:opacity-50"
                    >
                        {if busy { "Agendando..." } else { "Agendar" }}
                    </button>
                }
            </div>

            if *picking_customer {
                <ContactSelect
                    organization_id={props.organization_id.clone()}
                    on_select={on_customer}
                    on_close={close_picker}
                />
            }
        </div>
    }
}
