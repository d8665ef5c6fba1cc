use web_sys::HtmlInputElement;
use yew::prelude::*;

use smart_agenda_shared::Customer;
use smart_agenda_shared::contact::ContactDialog;

use crate::components::contact_dialog::ContactDialogModal;
use crate::hooks::{use_contact_search, use_customers};

#[derive(Properties, PartialEq)]
pub struct ContactSelectProps {
    pub organization_id: String,
    pub on_select: Callback<Customer>,
    pub on_close: Callback<()>,
}

/// Customer picker used by the booking wizard.
#[function_component(ContactSelect)]
pub fn contact_select(props: &ContactSelectProps) -> Html {
    let customers = use_customers(&props.organization_id);
    let search = use_contact_search(&props.organization_id);
    let creating = use_state(|| false);

    let all = customers.data.clone().unwrap_or_default();
    let displayed = search.displayed(&all);

    let oninput = {
        let set_query = search.set_query.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            set_query.emit(input.value());
        })
    };

    let open_create = {
        let creating = creating.clone();
        Callback::from(move |_: MouseEvent| creating.set(true))
    };
    let close_create = {
        let creating = creating.clone();
        Callback::from(move |_| creating.set(false))
    };
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let body = if search.is_pending() || (customers.loading && all.is_empty()) {
        html! { <p class="py-6 text-center text-sm text-gray-500">{"Pesquisando..."}</p> }
    } else if displayed.is_empty() {
        html! { <p class="py-6 text-center text-sm text-gray-500">{"Nenhum cliente encontrado"}</p> }
    } else {
        displayed
            .into_iter()
            .map(|customer| {
                let on_select = props.on_select.clone();
                let label = customer.label();
                let onclick = Callback::from(move |_: MouseEvent| on_select.emit(customer.clone()));
                html! {
                    <li>
                        <button type="button" {onclick} class="w-full text-left px-3 py-2 rounded hover:bg-gray-100 text-sm text-gray-800">
                            {label}
                        </button>
                    </li>
                }
            })
            .collect::<Html>()
    };

    html! {
        <>
            <div class="fixed inset-0 z-30 flex items-center justify-center bg-black/40">
                <div class="bg-white rounded-lg shadow-xl w-full max-w-lg p-6">
                    <h2 class="text-lg font-semibold text-gray-900">{"Selecionar Cliente"}</h2>
                    <p class="text-sm text-gray-500 mb-4">{"Pesquise e selecione um cliente para o agendamento."}</p>

                    <label for="contact-search" class="block text-sm font-medium text-gray-700">{"Pesquisar cliente"}</label>
                    <input
                        id="contact-search"
                        type="search"
                        class="mt-1 block w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-blue-500 focus:border-blue-500 sm:text-sm"
                        placeholder="Digite o nome"
                        value={search.query()}
                        {oninput}
                    />

                    <ul class="mt-4 max-h-64 overflow-y-auto divide-y divide-gray-100">
                        {body}
                    </ul>

                    <div class="flex justify-between pt-4">
                        <button type="button" onclick={on_close} class="px-4 py-2 rounded-md border border-gray-300 text-sm text-gray-700 hover:bg-gray-50">
                            {"Cancelar"}
                        </button>
                        <button type="button" onclick={open_create} class="px-4 py-2 rounded-md bg-blue-600 text-white text-sm hover:bg-blue-700">
                            {"Adicionar Novo Contato"}
                        </button>
                    </div>
                </div>
            </div>
            if *creating {
                <ContactDialogModal
                    organization_id={props.organization_id.clone()}
                    initial={ContactDialog::create()}
                    on_close={close_create}
                    on_success={search.rerun.clone()}
                />
            }
        </>
    }
}
