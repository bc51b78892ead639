use crate::error::RenderError;
use crate::uniforms::{SceneUniforms, WorldUniforms};

/// Round `value` up to the next multiple of `stride`.
///
/// `stride` must be a power of two and `value + stride - 1` must fit in a
/// `u64`. Use [`UniformLayout::new`] to validate a device-supplied stride.
pub const fn align(value: u64, stride: u64) -> u64 {
    debug_assert!(stride.is_power_of_two(), "stride must be a power of two");
    (value + stride - 1) & !(stride - 1)
}

/// Byte layout of the shared uniform buffer.
///
/// ```text
/// 0                  static block (scene uniforms)
/// dynamic_offset     slot 0 (world matrix of object 0)
/// + slot_stride      slot 1 ...
/// ```
/// Slots are addressed through a dynamic offset relative to
/// `dynamic_offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformLayout {
    alignment: u64,
    static_size: u64,
    dynamic_offset: u64,
    slot_size: u64,
    slot_stride: u64,
    slots: u32,
}

impl UniformLayout {
    pub fn new(
        static_size: u64,
        slot_size: u64,
        slots: u32,
        alignment: u64,
    ) -> Result<Self, RenderError> {
        if !alignment.is_power_of_two() {
            return Err(RenderError::InvalidAlignment(alignment));
        }
        Ok(Self {
            alignment,
            static_size,
            dynamic_offset: align(static_size, alignment),
            slot_size,
            slot_stride: align(slot_size, alignment),
            slots: slots.max(1),
        })
    }

    /// Layout for [`SceneUniforms`] followed by one [`WorldUniforms`] per object.
    pub fn scene(objects: u32, alignment: u64) -> Result<Self, RenderError> {
        Self::new(
            size_of::<SceneUniforms>() as u64,
            size_of::<WorldUniforms>() as u64,
            objects,
            alignment,
        )
    }

    pub fn alignment(&self) -> u64 {
        self.alignment
    }

    pub fn static_size(&self) -> u64 {
        self.static_size
    }

    /// Start of the dynamic region.
    pub fn dynamic_offset(&self) -> u64 {
        self.dynamic_offset
    }

    /// Size of one dynamic slot, which is also its binding size.
    pub fn slot_size(&self) -> u64 {
        self.slot_size
    }

    pub fn slots(&self) -> u32 {
        self.slots
    }

    /// Dynamic offset of `slot`, relative to [`Self::dynamic_offset`].
    pub fn slot_offset(&self, slot: u32) -> u32 {
        (u64::from(slot) * self.slot_stride) as u32
    }

    pub fn total_size(&self) -> u64 {
        self.dynamic_offset + u64::from(self.slots - 1) * self.slot_stride + self.slot_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_examples() {
        assert_eq!(align(148, 256), 256);
        assert_eq!(align(256, 256), 256);
        assert_eq!(align(0, 256), 0);
        assert_eq!(align(257, 256), 512);
        assert_eq!(align(96, 64), 128);
        assert_eq!(align(5, 1), 5);
    }

    #[test]
    fn align_is_idempotent_multiple_and_not_smaller() {
        for shift in 0..10 {
            let stride = 1u64 << shift;
            for value in (0..2000).step_by(7) {
                let a = align(value, stride);
                assert!(a >= value);
                assert_eq!(a % stride, 0);
                assert!(a - value < stride);
                assert_eq!(align(a, stride), a);
            }
        }
    }

    #[test]
    #[should_panic(expected = "power of two")]
    fn align_rejects_zero_stride() {
        align(5, 0);
    }

    #[test]
    #[should_panic(expected = "power of two")]
    fn align_rejects_non_power_of_two_stride() {
        align(5, 96);
    }

    #[test]
    fn align_near_upper_bound() {
        assert_eq!(align(u64::MAX - 255, 256), u64::MAX - 255);
    }

    #[test]
    fn scene_layout_with_256_alignment() {
        let layout = UniformLayout::scene(1, 256).unwrap();
        assert_eq!(layout.static_size(), 96);
        assert_eq!(layout.dynamic_offset(), 256);
        assert_eq!(layout.slot_size(), 64);
        assert_eq!(layout.total_size(), 320);
        assert_eq!(layout.slot_offset(0), 0);
    }

    #[test]
    fn static_block_of_144_bytes() {
        let layout = UniformLayout::new(144, 64, 1, 256).unwrap();
        assert_eq!(layout.dynamic_offset(), 256);
        assert_eq!(layout.total_size(), 320);

        let layout = UniformLayout::new(144, 64, 1, 16).unwrap();
        assert_eq!(layout.dynamic_offset(), 144);
    }

    #[test]
    fn multiple_slots_are_aligned() {
        let layout = UniformLayout::scene(3, 256).unwrap();
        assert_eq!(layout.slot_offset(1), 256);
        assert_eq!(layout.slot_offset(2), 512);
        assert_eq!(layout.total_size(), 256 + 512 + 64);
        for slot in 0..3 {
            let absolute = layout.dynamic_offset() + u64::from(layout.slot_offset(slot));
            assert_eq!(absolute % layout.alignment(), 0);
        }
    }

    #[test]
    fn zero_objects_still_reserve_one_slot() {
        let layout = UniformLayout::scene(0, 256).unwrap();
        assert_eq!(layout.slots(), 1);
        assert_eq!(layout.total_size(), 320);
    }

    #[test]
    fn rejects_non_power_of_two_alignment() {
        assert!(matches!(
            UniformLayout::scene(1, 96),
            Err(RenderError::InvalidAlignment(96))
        ));
        assert!(UniformLayout::scene(1, 0).is_err());
    }
}
