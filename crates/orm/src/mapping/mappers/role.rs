use crate::mapping::context::TraversalContext;
use crate::mapping::dto::RoleDto;
use crate::mapping::options::MappingOptions;
use crate::mapping::utils::{audit_fields, back_reference_id, nested, relation_ids};
use crate::model::{Record, Role};
use super::{EntityMapper, PermissionMapper};

#[derive(Debug, Clone, Copy, Default)]
pub struct RoleMapper;

impl EntityMapper for RoleMapper {
    type Entity = Role;
    type Dto = RoleDto;

    fn to_dto_in(&self, role: &Role, options: &MappingOptions, ctx: &TraversalContext) -> RoleDto {
        let ctx = ctx.enter(role.key());
        let owner_id = role.person().and_then(|person| person.id);

        RoleDto {
            id: role.id(),
            name: role.name.clone(),
            audit: audit_fields(&role.audit, options, &ctx),
            permission_ids: relation_ids(role.permissions(), options, &ctx, "permissions", "permissionIds"),
            permissions: nested(&PermissionMapper, role.permissions(), options, &ctx, "permissions"),
            person_id: back_reference_id(role.as_record_ref(), owner_id, options, &ctx, "personId"),
        }
    }
}
