// Spaces of service - rooms, chairs or stations where services happen

use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use smart_agenda_shared::cache::Mutation;
use smart_agenda_shared::{
    CreateSpaceOfServiceRequest, FieldErrors, UpdateSpaceOfServiceRequest, validation,
};

use crate::components::toast::use_toast;
use crate::hooks::{use_query_client, use_spaces};
use crate::pages::input_value;
use crate::services;

const NEW: &str = "new";

#[derive(Properties, PartialEq)]
pub struct SpaceOfServicePageProps {
    pub organization_id: String,
}

#[function_component(SpaceOfServicePage)]
pub fn space_of_service_page(props: &SpaceOfServicePageProps) -> Html {
    let spaces = use_spaces(&props.organization_id);
    let client = use_query_client();
    let toast = use_toast();
    let selected = use_state(|| NEW.to_string());
    let name = use_state(String::new);
    let description = use_state(String::new);
    let field_errors = use_state(FieldErrors::default);
    let saving = use_state(|| false);

    let list = spaces.data.clone().unwrap_or_default();

    let on_select = {
        let selected = selected.clone();
        let name = name.clone();
        let description = description.clone();
        let field_errors = field_errors.clone();
        let list = list.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let id = select.value();
            let space = list.iter().find(|s| s.id == id);
            name.set(space.map(|s| s.name.clone()).unwrap_or_default());
            description.set(space.map(|s| s.description.clone()).unwrap_or_default());
            field_errors.set(FieldErrors::default());
            selected.set(id);
        })
    };

    let on_name = {
        let name = name.clone();
        Callback::from(move |e: InputEvent| name.set(input_value(&e)))
    };
    let on_description = {
        let description = description.clone();
        Callback::from(move |e: InputEvent| description.set(input_value(&e)))
    };

    let onsubmit = {
        let name = name.clone();
        let description = description.clone();
        let field_errors = field_errors.clone();
        let saving = saving.clone();
        let selected = selected.clone();
        let organization_id = props.organization_id.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Err(errors) = validation::space_of_service(&name, &description) {
                field_errors.set(errors);
                return;
            }
            field_errors.set(FieldErrors::default());
            saving.set(true);

            let id = (*selected).clone();
            let (new_name, new_description) = ((*name).clone(), (*description).clone());
            let name = name.clone();
            let description = description.clone();
            let saving = saving.clone();
            let client = client.clone();
            let toast = toast.clone();
            let organization_id = organization_id.clone();
            spawn_local(async move {
                let creating = id == NEW;
                let result = if creating {
                    services::spaces::create(CreateSpaceOfServiceRequest {
                        organization_id: organization_id.clone(),
                        name: new_name,
                        description: new_description,
                    })
                    .await
                } else {
                    let changes = UpdateSpaceOfServiceRequest {
                        name: Some(new_name),
                        description: Some(new_description),
                    };
                    services::spaces::update(organization_id.clone(), id, changes).await
                };

                match result {
                    Ok(()) if creating => {
                        client.apply(&Mutation::CreateSpace { organization_id });
                        toast.success("Espaço de serviço criado com sucesso");
                        name.set(String::new());
                        description.set(String::new());
                    }
                    Ok(()) => {
                        client.apply(&Mutation::UpdateSpace { organization_id });
                        toast.success("Espaço de serviço atualizado com sucesso");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "space of service save failed");
                        toast.error("Erro ao salvar espaço de serviço", Some(e.user_message()));
                    }
                }
                saving.set(false);
            });
        })
    };

    let creating = *selected == NEW;
    let input_class = "mt-1 block w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-blue-500 focus:border-blue-500 sm:text-sm";

    html! {
        <div class="p-6 max-w-2xl space-y-6">
            <h1 class="text-2xl font-bold text-gray-900">{"Espaço de Serviço"}</h1>

            <select class={input_class} onchange={on_select}>
                <option value={NEW} selected={creating}>{"Novo espaço de serviço"}</option>
                {list.iter().map(|s| html! {
                    <option key={s.id.clone()} value={s.id.clone()} selected={*selected == s.id}>{s.name.clone()}</option>
                }).collect::<Html>()}
            </select>

            <form class="bg-white rounded-lg border border-gray-200 p-6 space-y-4" {onsubmit}>
                <div>
                    <label for="space-name" class="block text-sm font-medium text-gray-700">{"Nome"}</label>
                    <input id="space-name" type="text" class={input_class} value={(*name).clone()} oninput={on_name} />
                    if let Some(message) = field_errors.first("name") {
                        <p class="mt-1 text-sm text-red-600">{message}</p>
                    }
                </div>
                <div>
                    <label for="space-description" class="block text-sm font-medium text-gray-700">{"Descrição"}</label>
                    <textarea id="space-description" rows="3" class={input_class} value={(*description).clone()} oninput={on_description} />
                    if let Some(message) = field_errors.first("description") {
                        <p class="mt-1 text-sm text-red-600">{message}</p>
                    }
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
