use crate::mapping::context::TraversalContext;
use crate::mapping::dto::ContactDto;
use crate::mapping::options::MappingOptions;
use crate::mapping::utils::{audit_fields, back_reference_id};
use crate::model::{Contact, Record};
use super::EntityMapper;

#[derive(Debug, Clone, Copy, Default)]
pub struct ContactMapper;

impl EntityMapper for ContactMapper {
    type Entity = Contact;
    type Dto = ContactDto;

    fn to_dto_in(&self, contact: &Contact, options: &MappingOptions, ctx: &TraversalContext) -> ContactDto {
        let ctx = ctx.enter(contact.key());
        let owner_id = contact.person().and_then(|person| person.id);

        ContactDto {
            id: contact.id,
            contact_type: contact.contact_type,
            phone_number: contact.phone_number.clone(),
            email: contact.email.clone(),
            audit: audit_fields(&contact.audit, options, &ctx),
            person_id: back_reference_id(contact.as_record_ref(), owner_id, options, &ctx, "personId"),
        }
    }
}
