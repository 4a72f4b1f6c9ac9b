use bytemuck::{Pod, Zeroable};

/// Per-instance render data exposed to the host renderer via linear memory.
/// Must match the host protocol: 8 floats = 32 bytes stride.
///
/// Geometry is in world units; the host subtracts the camera offset. `kind`
/// and the three payload slots are game-defined.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// Left edge in world space.
    pub x: f32,
    /// Top edge in world space.
    pub y: f32,
    /// Drawn width in world units.
    pub width: f32,
    /// Drawn height in world units.
    pub height: f32,
    /// Game-defined draw kind.
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Render buffer containing all instances for one frame.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
    capacity: usize,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Append an instance. Returns false (and drops it) when the buffer is full.
    pub fn push(&mut self, instance: RenderInstance) -> bool {
        if self.instances.len() >= self.capacity {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for host reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    /// Instances viewed as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<RenderInstance>(), 32);
        assert_eq!(RenderInstance::FLOATS, 8);
    }

    #[test]
    fn render_buffer_push_and_count() {
        let mut buf = RenderBuffer::new();
        buf.push(RenderInstance::default());
        buf.push(RenderInstance::default());
        assert_eq!(buf.instance_count(), 2);
        assert_eq!(buf.as_floats().len(), 16);
    }

    #[test]
    fn render_buffer_respects_capacity() {
        let mut buf = RenderBuffer::with_capacity(1);
        assert!(buf.push(RenderInstance::default()));
        assert!(!buf.push(RenderInstance::default()));
        assert_eq!(buf.instance_count(), 1);
    }
}
