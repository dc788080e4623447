// Mon Jan 19 2026 - Alex

use crate::structure::{StructLayout, StructureError};

/// Checks the invariants a layout must hold before any rule looks at it.
pub struct StructureValidator;

impl StructureValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, layout: &StructLayout) -> Result<(), StructureError> {
        if layout.name().is_empty() {
            return Err(StructureError::MissingName);
        }
        if layout.total_size() == 0 {
            return Err(StructureError::ZeroSize);
        }

        let alignment = layout.declared_alignment();
        if alignment == 0 || !alignment.is_power_of_two() {
            return Err(StructureError::InvalidAlignment(alignment));
        }
        if layout.total_size() % alignment != 0 {
            return Err(StructureError::SizeNotMultiple {
                size: layout.total_size(),
                alignment,
            });
        }

        let mut previous: Option<(&str, u64)> = None;
        for member in layout.members() {
            if member.size() == 0 {
                return Err(StructureError::ZeroSizedMember {
                    member: member.name().to_string(),
                });
            }

            let end = member
                .end()
                .filter(|&end| end <= layout.total_size())
                .ok_or_else(|| StructureError::MemberOutOfBounds {
                    member: member.name().to_string(),
                    offset: member.offset(),
                    size: member.size(),
                    total_size: layout.total_size(),
                })?;

            if let Some((prev_name, prev_end)) = previous {
                if member.offset() < prev_end {
                    return Err(StructureError::Overlap {
                        first: prev_name.to_string(),
                        second: member.name().to_string(),
                        offset: member.offset(),
                    });
                }
            }
            previous = Some((member.name(), end));
        }

        Ok(())
    }
}

impl Default for StructureValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{StructLayoutBuilder, TypeKind};

    #[test]
    fn test_valid_packed_layout() {
        let layout = StructLayoutBuilder::new("sensor_reading_pack1_t")
            .total_size(19)
            .alignment(1)
            .packed(true)
            .member("timestamp", 0, 8, TypeKind::Int64)
            .member("battery_mv", 17, 2, TypeKind::Uint16)
            .build();
        assert!(StructureValidator::new().validate(&layout).is_ok());
    }

    #[test]
    fn test_member_past_end() {
        let layout = StructLayoutBuilder::new("short_t")
            .total_size(4)
            .alignment(4)
            .member("x", 2, 4, TypeKind::Int32)
            .build();
        let err = StructureValidator::new().validate(&layout).unwrap_err();
        assert!(matches!(err, StructureError::MemberOutOfBounds { offset: 2, .. }));
    }

    #[test]
    fn test_offset_overflow_is_out_of_bounds() {
        let layout = StructLayoutBuilder::new("huge_t")
            .total_size(8)
            .alignment(8)
            .member("x", u64::MAX, 2, TypeKind::Int16)
            .build();
        assert!(matches!(
            StructureValidator::new().validate(&layout),
            Err(StructureError::MemberOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_overlapping_members() {
        let layout = StructLayoutBuilder::new("union_like_t")
            .total_size(8)
            .alignment(4)
            .member("a", 0, 4, TypeKind::Int32)
            .member("b", 2, 4, TypeKind::Int32)
            .build();
        let err = StructureValidator::new().validate(&layout).unwrap_err();
        assert!(matches!(err, StructureError::Overlap { ref first, ref second, .. } if first == "a" && second == "b"));
    }

    #[test]
    fn test_size_must_be_multiple_of_alignment() {
        let layout = StructLayoutBuilder::new("odd_t")
            .total_size(6)
            .alignment(4)
            .member("a", 0, 4, TypeKind::Int32)
            .build();
        assert!(matches!(
            StructureValidator::new().validate(&layout),
            Err(StructureError::SizeNotMultiple { size: 6, alignment: 4 })
        ));

        let layout = StructLayoutBuilder::new("odd_t").total_size(6).alignment(3).build();
        assert!(matches!(
            StructureValidator::new().validate(&layout),
            Err(StructureError::InvalidAlignment(3))
        ));
    }

    #[test]
    fn test_empty_name_and_zero_size() {
        let unnamed = StructLayoutBuilder::new("").total_size(4).alignment(4).build();
        assert!(matches!(StructureValidator::new().validate(&unnamed), Err(StructureError::MissingName)));

        let empty = StructLayoutBuilder::new("empty_t").total_size(0).alignment(1).build();
        assert!(matches!(StructureValidator::new().validate(&empty), Err(StructureError::ZeroSize)));
    }
}
