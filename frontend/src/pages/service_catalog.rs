// Services - create a service or edit an existing one

use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use smart_agenda_shared::cache::Mutation;
use smart_agenda_shared::format;
use smart_agenda_shared::validation::ServiceForm;
use smart_agenda_shared::{CreateServiceRequest, FieldErrors, Service, UpdateServiceRequest};

use crate::components::toast::use_toast;
use crate::hooks::{use_query_client, use_services};
use crate::pages::input_value;
use crate::services;

const NEW: &str = "new";

fn form_for(service: &Service) -> ServiceForm {
    ServiceForm {
        name: service.name.clone(),
        description: service.description.clone(),
        price: service.price.to_string(),
        duration: service.duration.to_string(),
        observations: service.observations.clone().unwrap_or_default(),
    }
}

#[derive(Properties, PartialEq)]
pub struct ServiceCatalogPageProps {
    pub organization_id: String,
}

#[function_component(ServiceCatalogPage)]
pub fn service_catalog_page(props: &ServiceCatalogPageProps) -> Html {
    let services = use_services(&props.organization_id);
    let client = use_query_client();
    let toast = use_toast();
    let selected = use_state(|| NEW.to_string());
    let form = use_state(ServiceForm::default);
    let field_errors = use_state(FieldErrors::default);
    let saving = use_state(|| false);

    let list = services.data.clone().unwrap_or_default();

    let on_select = {
        let selected = selected.clone();
        let form = form.clone();
        let field_errors = field_errors.clone();
        let list = list.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let id = select.value();
            let next = list
                .iter()
                .find(|s| s.id == id)
                .map(form_for)
                .unwrap_or_default();
            form.set(next);
            field_errors.set(FieldErrors::default());
            selected.set(id);
        })
    };

    let field = |apply: fn(&mut ServiceForm, String)| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let mut next = (*form).clone();
            apply(&mut next, input_value(&e));
            form.set(next);
        })
    };
    let on_name = field(|f, v| f.name = v);
    let on_description = field(|f, v| f.description = v);
    let on_price = field(|f, v| f.price = v);
    let on_duration = field(|f, v| f.duration = v);
    let on_observations = field(|f, v| f.observations = v);

    let onsubmit = {
        let form = form.clone();
        let field_errors = field_errors.clone();
        let saving = saving.clone();
        let selected = selected.clone();
        let organization_id = props.organization_id.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let valid = match form.validate() {
                Ok(valid) => valid,
                Err(errors) => {
                    field_errors.set(errors);
                    return;
                }
            };
            field_errors.set(FieldErrors::default());
            saving.set(true);

            let id = (*selected).clone();
            let form = form.clone();
            let saving = saving.clone();
            let client = client.clone();
            let toast = toast.clone();
            let organization_id = organization_id.clone();
            spawn_local(async move {
                let creating = id == NEW;
                let result = if creating {
                    services::services::create(CreateServiceRequest {
                        organization_id: organization_id.clone(),
                        name: valid.name,
                        description: valid.description,
                        price: valid.price,
                        duration: valid.duration,
                        image: None,
                        observations: Some(valid.observations),
                    })
                    .await
                } else {
                    let changes = UpdateServiceRequest {
                        name: Some(valid.name),
                        description: Some(valid.description),
                        price: Some(valid.price),
                        duration: Some(valid.duration),
                        image: None,
                        observations: Some(valid.observations),
                    };
                    services::services::update(organization_id.clone(), id, changes).await
                };

                match result {
                    Ok(()) if creating => {
                        client.apply(&Mutation::CreateService { organization_id });
                        toast.success("Serviço criado com sucesso");
                        form.set(ServiceForm::default());
                    }
                    Ok(()) => {
                        client.apply(&Mutation::UpdateService { organization_id });
                        toast.success("Serviço atualizado com sucesso");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "service save failed");
                        toast.error("Erro ao salvar serviço", Some(e.user_message()));
                    }
                }
                saving.set(false);
            });
        })
    };

    let creating = *selected == NEW;
    let input_class = "mt-1 block w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-blue-500 focus:border-blue-500 sm:text-sm";
    let error_text = |name: &str| match field_errors.first(name) {
        Some(message) => html! { <p class="mt-1 text-sm text-red-600">{message.to_string()}</p> },
        None => html! {},
    };

    html! {
        <div class="p-6 max-w-2xl space-y-6">
            <h1 class="text-2xl font-bold text-gray-900">{"Serviços"}</h1>

            <select class={input_class} onchange={on_select}>
                <option value={NEW} selected={creating}>{"Novo serviço"}</option>
                {list.iter().map(|s| html! {
                    <option key={s.id.clone()} value={s.id.clone()} selected={*selected == s.id}>{format::service_label(&s.name, s.duration, s.price)}</option>
                }).collect::<Html>()}
            </select>

            <form class="bg-white rounded-lg border border-gray-200 p-6 space-y-4" {onsubmit}>
                <div>
                    <label for="service-name" class="block text-sm font-medium text-gray-700">{"Nome"}</label>
                    <input id="service-name" type="text" class={input_class} value={form.name.clone()} oninput={on_name} />
                    {error_text("name")}
                </div>
                <div>
                    <label for="service-description" class="block text-sm font-medium text-gray-700">{"Descrição"}</label>
                    <input id="service-description" type="text" class={input_class} value={form.description.clone()} oninput={on_description} />
                    {error_text("description")}
                </div>
                <div class="grid grid-cols-2 gap-4">
                    <div>
                        <label for="service-price" class="block text-sm font-medium text-gray-700">{"Preço (R$)"}</label>
                        <input id="service-price" type="text" inputmode="decimal" class={input_class} value={form.price.clone()} oninput={on_price} />
                        {error_text("price")}
                    </div>
                    <div>
                        <label for="service-duration" class="block text-sm font-medium text-gray-700">{"Duração (min)"}</label>
                        <input id="service-duration" type="number" class={input_class} value={form.duration.clone()} oninput={on_duration} />
                        {error_text("duration")}
                    </div>
                </div>
                <div>
                    <label for="service-observations" class="block text-sm font-medium text-gray-700">{"Observações"}</label>
                    <textarea id="service-observations" rows="4" class={input_class} value={form.observations.clone()} oninput={on_observations} />
                    {error_text("observations")}
                </div>
                <div class="flex justify-end">
                    <button type="submit" disabled={*saving} class="px-4 py-2 rounded-md bg-blue-600 text-white text-sm hover:bg-blue-700 disabled:opacity-50">
                        {match (*saving, creating) {
                            (true, _) => "Salvando...",
                            (false, true) => "Criar",
                            (false, false) => "Salvar",
                        }}
                    </button>
                </div>
            </form>
        </div>
    }
}
