use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use smart_agenda_shared::cache::Mutation;
use smart_agenda_shared::{FieldErrors, validation};

use crate::Route;
use crate::components::toast::use_toast;
use crate::hooks::use_query_client;
use crate::services;

#[function_component(NewOrganizationPage)]
pub fn new_organization_page() -> Html {
    let navigator = use_navigator();
    let client = use_query_client();
    let toast = use_toast();
    let name = use_state(String::new);
    let field_errors = use_state(FieldErrors::default);
    let error_message = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let oninput = {
        let name = name.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            name.set(input.value());
        })
    };

    let onsubmit = {
        let name = name.clone();
        let field_errors = field_errors.clone();
        let error_message = error_message.clone();
        let saving = saving.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let valid = match validation::organization_name(&name) {
                Ok(valid) => valid,
                Err(errors) => {
                    field_errors.set(errors);
                    return;
                }
            };
            field_errors.set(FieldErrors::default());
            error_message.set(None);
            saving.set(true);

            let navigator = navigator.clone();
            let client = client.clone();
            let toast = toast.clone();
            let error_message = error_message.clone();
            let saving = saving.clone();
            spawn_local(async move {
                match services::organizations::create(valid).await {
                    Ok(()) => {
                        client.apply(&Mutation::CreateOrganization);
                        toast.success("Organização criada com sucesso");
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Home);
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "organization create failed");
                        error_message.set(Some(e.user_message()));
                    }
                }
                saving.set(false);
            });
        })
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-gray-50 px-4">
            <form class="w-full max-w-md bg-white rounded-lg shadow p-8 space-y-6" {onsubmit}>
                <h1 class="text-2xl font-bold text-gray-900">{"Nova organização"}</h1>
                <div>
                    <label for="organization-name" class="block text-sm font-medium text-gray-700">{"Nome"}</label>
                    <input
                        id="organization-name"
                        type="text"
                        class="mt-1 block w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-blue-500 focus:border-blue-500 sm:text-sm"
                        value={(*name).clone()}
                        {oninput}
                    />
                    if let Some(message) = field_errors.first("name") {
                        <p class="mt-1 text-sm text-red-600">{message}</p>
                    }
                </div>

                if let Some(error) = (*error_message).clone() {
                    <div class="bg-red-50 border border-red-200 text-red-700 px-4 py-3 rounded">{error}</div>
                }

                <div class="flex justify-between">
                    <Link<Route> to={Route::Home} classes="px-4 py-2 rounded-md border border-gray-300 text-sm text-gray-700 hover:bg-gray-50">
                        {"Voltar"}
                    </Link<Route>>
                    <button type="submit" disabled={*saving} class="px-4 py-2 rounded-md bg-blue-600 text-white text-sm hover:bg-blue-700 disabled:opacity-50">
                        {if *saving { "Criando..." } else { "Criar" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
