//! Typedef resolution.
//!
//! Typedefs are resolved in input order against the live typedef table. A
//! typedef whose underlying type names another typedef that has not been seen
//! yet gets exactly one lookahead hop: the referenced typedef's own type is
//! mapped in its place. Deeper forward chains stay unresolved.

use std::borrow::Cow;

use super::context::ResolverContext;
use super::native::NativeType;
use super::types::{Definition, TypedefDefinition};

/// Resolves typedef and struct definitions into the typedef table.
pub struct TypedefResolver<'d> {
    definitions: &'d [Definition],
}

impl<'d> TypedefResolver<'d> {
    /// Create a resolver over the full definition list.
    pub fn new(definitions: &'d [Definition]) -> Self {
        TypedefResolver { definitions }
    }

    /// Resolve every typedef and struct definition, in input order.
    pub fn resolve_all(&self, ctx: &mut ResolverContext) {
        for def in self.definitions {
            let typedef = match def {
                Definition::Typedef(t) => Cow::Borrowed(t),
                Definition::Struct(s) => Cow::Owned(s.clone().into_typedef()),
                Definition::Function(_) => continue,
            };
            self.resolve(&typedef, ctx);
        }
    }

    /// Resolve one typedef, registering it on success.
    ///
    /// Returns the table entry for the name, which is the first type it ever
    /// resolved to.
    pub fn resolve(
        &self,
        typedef: &TypedefDefinition,
        ctx: &mut ResolverContext,
    ) -> Option<NativeType> {
        ctx.stats_mut().typedefs.total += 1;

        let resolved = ctx
            .mapper()
            .map(&typedef.ty, Some(&typedef.name))
            .or_else(|| self.lookahead(typedef, ctx));

        match resolved {
            Some(native) => {
                ctx.stats_mut().typedefs.generated += 1;
                let native = ctx.register_typedef(&typedef.name, native).clone();
                tracing::debug!("typedef `{}` => {}", typedef.name, native);
                Some(native)
            }
            None => {
                tracing::warn!(
                    "skipping typedef `{}` @ {}: unmapped type `{}`",
                    typedef.name,
                    typedef.location,
                    typedef.ty.tag
                );
                None
            }
        }
    }

    /// One hop: map the typedef named by `typedef`'s underlying tag, or the
    /// struct definition named by a `:struct` reference.
    fn lookahead(&self, typedef: &TypedefDefinition, ctx: &ResolverContext) -> Option<NativeType> {
        if let Some(name) = typedef.ty.referenced_struct() {
            let target = self.definitions.iter().find_map(|def| match def {
                Definition::Struct(s) if s.name == name => Some(s),
                _ => None,
            })?;

            tracing::debug!(
                "typedef `{}` forward-references struct `{}`",
                typedef.name,
                target.name
            );
            let target = target.clone().into_typedef();
            return ctx.mapper().map(&target.ty, Some(&target.name));
        }

        let target = self.definitions.iter().find_map(|def| match def {
            Definition::Typedef(t) if t.name == typedef.ty.tag && t.name != typedef.name => {
                Some(t)
            }
            _ => None,
        })?;

        tracing::debug!(
            "typedef `{}` forward-references `{}`",
            typedef.name,
            target.name
        );
        ctx.mapper().map(&target.ty, Some(&target.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::types::{Field, StructDefinition, Type};

    fn typedef(name: &str, tag: &str) -> Definition {
        Definition::Typedef(TypedefDefinition::new(name, Type::new(tag)))
    }

    fn resolve(defs: &[Definition]) -> ResolverContext {
        let mut ctx = ResolverContext::new();
        TypedefResolver::new(defs).resolve_all(&mut ctx);
        ctx
    }

    #[test]
    fn test_direct_typedef() {
        let defs: Vec<Definition> = serde_json::from_str(
            r#"[{"tag":"typedef","name":"__uint32_t","type":{"tag":":unsigned-int"}}]"#,
        )
        .unwrap();
        let ctx = resolve(&defs);

        assert_eq!(ctx.typedef("__uint32_t"), Some(&NativeType::U32));
        assert_eq!(ctx.stats().typedefs.total, 1);
        assert_eq!(ctx.stats().typedefs.generated, 1);
    }

    #[test]
    fn test_backward_reference_uses_live_table() {
        let defs = vec![typedef("__u32", ":unsigned-int"), typedef("u32_t", "__u32")];
        let ctx = resolve(&defs);

        assert_eq!(ctx.typedef("u32_t"), Some(&NativeType::U32));
        assert_eq!(ctx.stats().typedefs.skipped(), 0);
    }

    #[test]
    fn test_forward_reference_one_hop() {
        let defs = vec![typedef("handle_t", "__handle"), typedef("__handle", ":pointer")];
        let ctx = resolve(&defs);

        assert_eq!(ctx.typedef("handle_t"), Some(&NativeType::Pointer));
        assert_eq!(ctx.typedef("__handle"), Some(&NativeType::Pointer));
        assert_eq!(ctx.stats().typedefs.generated, 2);
    }

    #[test]
    fn test_forward_chain_deeper_than_one_hop_is_skipped() {
        let defs = vec![
            typedef("a_t", "b_t"),
            typedef("b_t", "c_t"),
            typedef("c_t", ":int"),
        ];
        let ctx = resolve(&defs);

        assert_eq!(ctx.typedef("a_t"), None);
        assert_eq!(ctx.typedef("b_t"), Some(&NativeType::I32));
        assert_eq!(ctx.typedef("c_t"), Some(&NativeType::I32));
        assert_eq!(ctx.stats().typedefs.total, 3);
        assert_eq!(ctx.stats().typedefs.skipped(), 1);
    }

    #[test]
    fn test_unresolvable_typedef_is_counted_not_fatal() {
        let defs = vec![typedef("FILE", "_IO_FILE"), typedef("ok_t", ":char")];
        let ctx = resolve(&defs);

        assert_eq!(ctx.typedef("FILE"), None);
        assert_eq!(ctx.typedef("ok_t"), Some(&NativeType::I8));
        assert_eq!(ctx.stats().typedefs.skipped(), 1);
    }

    #[test]
    fn test_struct_registers_under_its_name() {
        let defs = vec![
            Definition::Struct(
                StructDefinition::new("point")
                    .with_field(Field::new("x", Type::new(":int")))
                    .with_field(Field::new("y", Type::new("int32_t"))),
            ),
            Definition::Typedef(TypedefDefinition::new("point_t", Type::struct_ref("point"))),
        ];
        let ctx = resolve(&defs);

        let expected = NativeType::Struct(vec![NativeType::I32, NativeType::I32]);
        assert_eq!(ctx.typedef("point"), Some(&expected));
        assert_eq!(ctx.typedef("point_t"), Some(&expected));
        assert_eq!(ctx.stats().typedefs.total, 2);
    }

    #[test]
    fn test_typedef_of_struct_declared_later() {
        let defs = vec![
            Definition::Typedef(TypedefDefinition::new("point_t", Type::struct_ref("point"))),
            Definition::Struct(
                StructDefinition::new("point").with_field(Field::new("x", Type::new(":int"))),
            ),
        ];
        let ctx = resolve(&defs);

        let expected = NativeType::Struct(vec![NativeType::I32]);
        assert_eq!(ctx.typedef("point_t"), Some(&expected));
        assert_eq!(ctx.typedef("point"), Some(&expected));
        assert_eq!(ctx.stats().typedefs.total, 2);
        assert_eq!(ctx.stats().typedefs.generated, 2);
    }

    #[test]
    fn test_typedef_of_undefined_struct_is_skipped() {
        let defs = vec![Definition::Typedef(TypedefDefinition::new(
            "opaque_t",
            Type::struct_ref("opaque"),
        ))];
        let ctx = resolve(&defs);

        assert_eq!(ctx.typedef("opaque_t"), None);
        assert_eq!(ctx.stats().typedefs.skipped(), 1);
    }

    #[test]
    fn test_struct_with_unmapped_field_is_skipped() {
        let defs = vec![Definition::Struct(
            StructDefinition::new("bad")
                .with_field(Field::new("x", Type::new(":int")))
                .with_field(Field::new("f", Type::new(":float"))),
        )];
        let ctx = resolve(&defs);

        assert_eq!(ctx.typedef("bad"), None);
        assert_eq!(ctx.stats().typedefs.skipped(), 1);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let defs = vec![typedef("size_t", ":unsigned-long")];
        let mut ctx = ResolverContext::new();
        let resolver = TypedefResolver::new(&defs);
        let Definition::Typedef(t) = &defs[0] else {
            unreachable!()
        };

        let first = resolver.resolve(t, &mut ctx);
        let second = resolver.resolve(t, &mut ctx);
        assert_eq!(first, Some(NativeType::U64));
        assert_eq!(first, second);
        assert_eq!(ctx.typedef_count(), 1);
    }

    #[test]
    fn test_functions_are_ignored() {
        let defs: Vec<Definition> = serde_json::from_str(
            r#"[{"tag":"function","name":"f","parameters":[],"return-type":{"tag":":void"}}]"#,
        )
        .unwrap();
        let ctx = resolve(&defs);

        assert_eq!(ctx.stats().typedefs.total, 0);
    }
}
