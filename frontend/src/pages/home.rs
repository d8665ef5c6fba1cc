// Home - pick the organization to work in

use web_sys::HtmlSelectElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::hooks::{use_current_user, use_organizations};

const NEW_ORGANIZATION: &str = "__new__";

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let navigator = use_navigator();
    let user = use_current_user();
    let organizations = use_organizations();

    let onchange = Callback::from(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        let value = select.value();
        let Some(navigator) = navigator.as_ref() else {
            return;
        };
        match value.as_str() {
            "" => {}
            NEW_ORGANIZATION => navigator.push(&Route::NewOrganization),
            id => navigator.push(&Route::Agenda {
                organization_id: id.to_string(),
            }),
        }
    });

    let greeting = user
        .data
        .as_ref()
        .map(|u| format!("Olá, {}", u.name))
        .unwrap_or_default();

    html! {
        <div class="min-h-screen flex items-center justify-center bg-gray-50 px-4">
            <div class="w-full max-w-md bg-white rounded-lg shadow p-8 space-y-6">
                <div class="text-center">
                    <h1 class="text-2xl font-bold text-gray-900">{"Bem vindo ao Smart Agenda!"}</h1>
                    if !greeting.is_empty() {
                        <p class="mt-1 text-gray-600">{greeting}</p>
                    }
                </div>

                if let Some(error) = &organizations.error {
                    <div class="bg-red-50 border border-red-200 text-red-700 px-4 py-3 rounded">
                        {error.user_message()}
                    </div>
                }

                <div>
                    <label for="organization" class="block text-sm font-medium text-gray-700">{"Organização"}</label>
                    <select
                        id="organization"
                        class="mt-1 block w-full px-3 py-2 border border-gray-300 rounded-md bg-white focus:outline-none focus:ring-blue-500 focus:border-blue-500 sm:text-sm"
                        disabled={organizations.loading && organizations.data.is_none()}
                        {onchange}
                    >
                        <option value="" selected=true>
                            {if organizations.loading { "Carregando..." } else { "Selecione uma organização" }}
                        </option>
                        {organizations.data.iter().flatten().map(|org| html! {
                            <option key={org.id.clone()} value={org.id.clone()}>{org.name.clone()}</option>
                        }).collect::<Html>()}
                        <option value={NEW_ORGANIZATION}>{"Nova organização"}</option>
                    </select>
                </div>
            </div>
        </div>
    }
}
