use crate::mapping::context::TraversalContext;
use crate::mapping::dto::AddressDto;
use crate::mapping::options::MappingOptions;
use crate::mapping::utils::{audit_fields, back_reference_id};
use crate::model::{Address, Record};
use super::EntityMapper;

#[derive(Debug, Clone, Copy, Default)]
pub struct AddressMapper;

impl EntityMapper for AddressMapper {
    type Entity = Address;
    type Dto = AddressDto;

    fn to_dto_in(&self, address: &Address, options: &MappingOptions, ctx: &TraversalContext) -> AddressDto {
        let ctx = ctx.enter(address.key());
        let owner_id = address.person().and_then(|person| person.id);

        AddressDto {
            id: address.id,
            address_type: address.address_type,
            street: address.street.clone(),
            post_zip_code: address.post_zip_code.clone(),
            province: address.province.clone(),
            city: address.city.clone(),
            country: address.country.clone(),
            audit: audit_fields(&address.audit, options, &ctx),
            person_id: back_reference_id(address.as_record_ref(), owner_id, options, &ctx, "personId"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AddressType, Person};

    #[test]
    fn test_standalone_address_reports_owner_at_summary() {
        let mut person = Person::new("John", "Doe").with_id(1);
        person.add_address(Address::new(AddressType::Local).with_id(5));
        let address = person.addresses().find(5).unwrap();

        assert_eq!(AddressMapper.to_dto(address, &MappingOptions::summary()).person_id, Some(1));
        assert_eq!(AddressMapper.to_dto(address, &MappingOptions::basic()).person_id, None);
        assert_eq!(
            AddressMapper.to_dto(address, &MappingOptions::with_fields(["personId"])).person_id,
            Some(1)
        );
    }
}
