use crate::mapping::context::TraversalContext;
use crate::mapping::dto::PermissionDto;
use crate::mapping::options::MappingOptions;
use crate::mapping::utils::{audit_fields, back_reference_id};
use crate::model::{Permission, Record};
use super::EntityMapper;

#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionMapper;

impl EntityMapper for PermissionMapper {
    type Entity = Permission;
    type Dto = PermissionDto;

    fn to_dto_in(&self, permission: &Permission, options: &MappingOptions, ctx: &TraversalContext) -> PermissionDto {
        let ctx = ctx.enter(permission.key());
        let owner_id = permission.role().and_then(|role| role.id);

        PermissionDto {
            id: permission.id,
            permission: permission.permission.clone(),
            audit: audit_fields(&permission.audit, options, &ctx),
            role_id: back_reference_id(permission.as_record_ref(), owner_id, options, &ctx, "roleId"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    #[test]
    fn test_standalone_permission_reports_role() {
        let mut role = Role::new("USER").with_id(10);
        role.add_permission(Permission::new("READ_PRIVILEGES").with_id(100));
        let permission = role.permissions().find(100).unwrap();

        assert_eq!(PermissionMapper.to_dto(permission, &MappingOptions::summary()).role_id, Some(10));
        assert_eq!(PermissionMapper.to_simple_dto(permission).role_id, None);
        assert_eq!(PermissionMapper.to_dto_opt(None, &MappingOptions::complete()), None);
    }
}
