// Contacts - searchable customer list with a create/manage dialog

use web_sys::HtmlInputElement;
use yew::prelude::*;

use smart_agenda_shared::contact::ContactDialog;

use crate::components::contact_dialog::ContactDialogModal;
use crate::hooks::{use_contact_search, use_customers};

#[derive(Properties, PartialEq)]
pub struct ContactsPageProps {
    pub organization_id: String,
}

#[function_component(ContactsPage)]
pub fn contacts_page(props: &ContactsPageProps) -> Html {
    let customers = use_customers(&props.organization_id);
    let search = use_contact_search(&props.organization_id);
    let dialog = use_state(|| None::<ContactDialog>);

    let all = customers.data.clone().unwrap_or_default();
    let displayed = search.displayed(&all);
    let query = search.query();

    let oninput = {
        let set_query = search.set_query.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            set_query.emit(input.value());
        })
    };

    let open_create = {
        let dialog = dialog.clone();
        Callback::from(move |_: MouseEvent| dialog.set(Some(ContactDialog::create())))
    };
    let close_dialog = {
        let dialog = dialog.clone();
        Callback::from(move |_| dialog.set(None))
    };

    let rows = displayed
        .into_iter()
        .map(|customer| {
            let onclick = {
                let dialog = dialog.clone();
                let customer = customer.clone();
                Callback::from(move |_: MouseEvent| {
                    dialog.set(Some(ContactDialog::view(customer.clone())))
                })
            };
            html! {
                <tr key={customer.id.clone()} {onclick} class="cursor-pointer hover:bg-gray-50">
                    <td class="px-6 py-4 text-sm text-gray-900">{customer.name}</td>
                    <td class="px-6 py-4 text-sm text-gray-600">{customer.phone}</td>
                </tr>
            }
        })
        .collect::<Vec<Html>>();

    let empty_message = if search.is_pending() {
        "Pesquisando...".to_string()
    } else if search.is_searching() {
        format!("Nenhum contato encontrado para \"{}\"", query.trim())
    } else {
        "Nenhum contato cadastrado".to_string()
    };

    html! {
        <div class="p-6 space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold text-gray-900">{"Contatos"}</h1>
                <button onclick={open_create} class="px-4 py-2 rounded-md bg-blue-600 text-white text-sm hover:bg-blue-700">
                    {"Adicionar Novo Contato"}
                </button>
            </div>

            <input
                type="search"
                class="block w-full max-w-md px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-blue-500 focus:border-blue-500 sm:text-sm"
                placeholder="Pesquisar contato"
                value={query}
                {oninput}
            />

            if let Some(error) = &customers.error {
                <div class="bg-red-50 border border-red-200 text-red-700 px-4 py-3 rounded">{error.user_message()}</div>
            }

            <div class="bg-white rounded-lg border border-gray-200 overflow-hidden">
                if customers.loading && all.is_empty() {
                    <p class="p-6 text-center text-sm text-gray-500">{"Carregando..."}</p>
                } else if rows.is_empty() {
                    <p class="p-6 text-center text-sm text-gray-500">{empty_message}</p>
                } else {
                    <table class="min-w-full divide-y divide-gray-200">
                        <thead class="bg-gray-50">
                            <tr>
                                <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">{"Nome"}</th>
                                <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">{"Telefone"}</th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-gray-200">{rows}</tbody>
                    </table>
                }
            </div>

            if let Some(initial) = (*dialog).clone() {
                <ContactDialogModal
                    organization_id={props.organization_id.clone()}
                    {initial}
                    on_close={close_dialog}
                    on_success={search.rerun.clone()}
                />
            }
        </div>
    }
}
