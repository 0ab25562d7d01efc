//! Nesting resolution over declared return types.

use crate::types::TypeDescriptor;

///
/// TypeShapeResolver
///
/// Yields the descriptor at a nesting depth of a declared type: depth 0 is
/// the declared type itself. Must return `None` once `depth` exceeds the
/// declared nesting depth.
///

pub trait TypeShapeResolver: Send + Sync {
    fn resolve<'a>(&self, declared: &'a TypeDescriptor, depth: usize)
    -> Option<&'a TypeDescriptor>;
}

///
/// NestedTypeResolver
///
/// Each level descends into the last generic parameter of the previous one.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NestedTypeResolver;

impl TypeShapeResolver for NestedTypeResolver {
    fn resolve<'a>(
        &self,
        declared: &'a TypeDescriptor,
        depth: usize,
    ) -> Option<&'a TypeDescriptor> {
        let mut current = declared;
        for _ in 0..depth {
            current = current.nested()?;
        }

        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawType;

    #[test]
    fn depth_zero_is_the_declared_type() {
        let declared = TypeDescriptor::of(RawType::Int);

        assert_eq!(NestedTypeResolver.resolve(&declared, 0), Some(&declared));
        assert_eq!(NestedTypeResolver.resolve(&declared, 1), None);
    }

    #[test]
    fn each_level_descends_one_generic() {
        let declared: TypeDescriptor = "Future<Optional<List<Int>>>".parse().unwrap();

        let raws: Vec<_> = (0..5)
            .map(|depth| {
                NestedTypeResolver
                    .resolve(&declared, depth)
                    .map(|d| d.raw().label())
            })
            .collect();

        assert_eq!(
            raws,
            vec![
                Some("Future"),
                Some("Optional"),
                Some("List"),
                Some("Int"),
                None
            ]
        );
    }

    #[test]
    fn map_levels_descend_into_the_value_type() {
        let declared: TypeDescriptor = "Map<Text, Lazy<Int>>".parse().unwrap();

        let level_one = NestedTypeResolver.resolve(&declared, 1).unwrap();
        assert_eq!(level_one.to_string(), "Lazy<Int>");
        assert_eq!(
            NestedTypeResolver.resolve(&declared, 2).map(TypeDescriptor::raw),
            Some(&RawType::Int)
        );
    }
}
