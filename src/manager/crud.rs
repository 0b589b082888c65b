// CRUD handlers - one per menu action
// Each handler gathers its input, runs one or two statements and returns the
// outcome for the menu to render.

use crate::core::data::{parse_contact_id, AddressPolicy, ContactDraft};
use crate::core::operations::ContactOperations;
use crate::core::traits::{Console, QueryExecutor};
use crate::utils::error::{AppError, AppResult, FlowResult};

const UPDATE_ADDRESS_PROMPT: &str = "Type \"none\" to remove your address, press Enter to use your current one, or type a brand new address:";

// Read operations
pub async fn handle_view_command<E, C>(db: &mut E, console: &mut C) -> AppResult<FlowResult>
where
    E: QueryExecutor + ?Sized,
    C: Console + ?Sized,
{
    console.clear()?;

    let contacts = ContactOperations::new(db)
        .list_contacts()
        .await
        .map_err(|e| AppError::query("fetching contacts", e))?;

    if contacts.is_empty() {
        return Ok(FlowResult::EmptyList);
    }
    Ok(FlowResult::Contacts(contacts))
}

// Create operations
pub async fn handle_create_command<E, C>(db: &mut E, console: &mut C) -> AppResult<FlowResult>
where
    E: QueryExecutor + ?Sized,
    C: Console + ?Sized,
{
    let draft = prompt_draft(console, &ContactDraft::default(), "Enter the address (optional):")?;
    let draft = ContactDraft {
        address: Some(draft.address_input),
        ..draft.fields
    };

    ContactOperations::new(db)
        .insert_contact(&draft)
        .await
        .map_err(|e| AppError::query("creating contact", e))?;

    log::info!("created contact {} {}", draft.first_name, draft.last_name);
    Ok(FlowResult::Success("Contact created successfully!".to_string()))
}

// Update operations
pub async fn handle_update_command<E, C>(db: &mut E, console: &mut C) -> AppResult<FlowResult>
where
    E: QueryExecutor + ?Sized,
    C: Console + ?Sized,
{
    let id = prompt_contact_id(console, "Enter the ID of the contact you want to update:")?;
    let mut ops = ContactOperations::new(db);

    let current = ops
        .find_contact(id)
        .await
        .map_err(|e| AppError::query("updating contact", e))?
        .ok_or(AppError::NotFound(id))?;

    let answers = prompt_draft(console, &current.to_draft(), UPDATE_ADDRESS_PROMPT)?;
    let address = AddressPolicy::from_input(&answers.address_input).resolve(current.address);
    let draft = ContactDraft {
        address,
        ..answers.fields
    };

    ops.update_contact(id, &draft)
        .await
        .map_err(|e| AppError::query("updating contact", e))?;

    log::info!("updated contact {}", id);
    Ok(FlowResult::Success("Contact updated successfully!".to_string()))
}

// Delete operations
pub async fn handle_delete_command<E, C>(db: &mut E, console: &mut C) -> AppResult<FlowResult>
where
    E: QueryExecutor + ?Sized,
    C: Console + ?Sized,
{
    let id = prompt_contact_id(console, "Enter the ID of the contact you want to delete:")?;
    let mut ops = ContactOperations::new(db);

    ops.find_contact(id)
        .await
        .map_err(|e| AppError::query("deleting contact", e))?
        .ok_or(AppError::NotFound(id))?;

    ops.delete_contact(id)
        .await
        .map_err(|e| AppError::query("deleting contact", e))?;

    log::info!("deleted contact {}", id);
    Ok(FlowResult::Success("Contact deleted successfully!".to_string()))
}

fn prompt_contact_id<C: Console + ?Sized>(console: &mut C, message: &str) -> AppResult<i32> {
    let input = console.input(message, None)?;
    parse_contact_id(&input)
}

/// Answers to the five contact prompts; the address stays raw so each
/// workflow can interpret it.
struct DraftAnswers {
    fields: ContactDraft,
    address_input: String,
}

fn prompt_draft<C: Console + ?Sized>(
    console: &mut C,
    defaults: &ContactDraft,
    address_message: &str,
) -> AppResult<DraftAnswers> {
    let fields = ContactDraft {
        first_name: console.input("Enter the first name:", Some(defaults.first_name.as_str()))?,
        last_name: console.input("Enter the last name:", Some(defaults.last_name.as_str()))?,
        phone_number: console.input("Enter the phone number:", Some(defaults.phone_number.as_str()))?,
        email: console.input("Enter the email address:", Some(defaults.email.as_str()))?,
        address: defaults.address.clone(),
    };
    let address_input = console.input(address_message, None)?;

    Ok(DraftAnswers {
        fields,
        address_input,
    })
}
