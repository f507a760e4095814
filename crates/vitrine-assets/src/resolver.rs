//! Turns accessors into typed vertex data read out of the BIN chunk.

use crate::cursor::ByteCursor;
use crate::descriptor::{AccessorDef, SceneDescriptor};
use crate::error::GlbError;

/// glTF accessor component types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    UnsignedInt,
    Float,
}

impl ComponentType {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            5120 => Some(ComponentType::Byte),
            5121 => Some(ComponentType::UnsignedByte),
            5122 => Some(ComponentType::Short),
            5123 => Some(ComponentType::UnsignedShort),
            5125 => Some(ComponentType::UnsignedInt),
            5126 => Some(ComponentType::Float),
            _ => None,
        }
    }

    pub fn size(self) -> usize {
        match self {
            ComponentType::Byte | ComponentType::UnsignedByte => 1,
            ComponentType::Short | ComponentType::UnsignedShort => 2,
            ComponentType::UnsignedInt | ComponentType::Float => 4,
        }
    }

    /// Decode one component. `raw` holds exactly `self.size()` bytes.
    fn decode(self, raw: &[u8], normalized: bool) -> f32 {
        match self {
            ComponentType::Float => f32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]),
            ComponentType::Byte => {
                let v = f32::from(raw[0] as i8);
                if normalized {
                    (v / 127.0).max(-1.0)
                } else {
                    v
                }
            }
            ComponentType::UnsignedByte => {
                let v = f32::from(raw[0]);
                if normalized {
                    v / 255.0
                } else {
                    v
                }
            }
            ComponentType::Short => {
                let v = f32::from(i16::from_le_bytes([raw[0], raw[1]]));
                if normalized {
                    (v / 32767.0).max(-1.0)
                } else {
                    v
                }
            }
            ComponentType::UnsignedShort => {
                let v = f32::from(u16::from_le_bytes([raw[0], raw[1]]));
                if normalized {
                    v / 65535.0
                } else {
                    v
                }
            }
            ComponentType::UnsignedInt => u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]) as f32,
        }
    }
}

/// Byte layout of an accessor inside the BIN chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    component: ComponentType,
    normalized: bool,
    /// Start of the first element, relative to the BIN chunk.
    start: usize,
    stride: usize,
}

/// Reads accessor data from the BIN chunk of one asset.
pub struct BufferResolver<'a> {
    descriptor: &'a SceneDescriptor,
    bin: Option<&'a [u8]>,
}

impl<'a> BufferResolver<'a> {
    pub fn new(descriptor: &'a SceneDescriptor, bin: Option<&'a [u8]>) -> Self {
        Self { descriptor, bin }
    }

    /// Read a VEC3 accessor as float triples, copied out of the BIN chunk.
    ///
    /// Accessors without a `bufferView` are read from the start of the BIN
    /// chunk. Otherwise the view's offset and stride apply.
    pub fn resolve_positions(&self, accessor: &AccessorDef) -> Result<Vec<[f32; 3]>, GlbError> {
        if accessor.count == 0 {
            return Ok(Vec::new());
        }
        let bin = self.bin.ok_or(GlbError::MissingBinaryChunk)?;
        let layout = self.layout(accessor, bin.len())?;

        let cursor = ByteCursor::new(bin);
        let size = layout.component.size();
        let mut positions = Vec::with_capacity(accessor.count as usize);
        for i in 0..accessor.count as usize {
            let element = cursor.slice(layout.start + i * layout.stride, size * 3)?;
            let mut value = [0.0f32; 3];
            for (out, raw) in value.iter_mut().zip(element.chunks_exact(size)) {
                *out = layout.component.decode(raw, layout.normalized);
            }
            positions.push(value);
        }
        Ok(positions)
    }

    fn layout(&self, accessor: &AccessorDef, bin_len: usize) -> Result<Layout, GlbError> {
        match accessor.element_type.as_deref() {
            None | Some("VEC3") => {}
            Some(other) => {
                return Err(GlbError::UnsupportedAccessor(format!(
                    "element type {other}, positions must be VEC3"
                )))
            }
        }

        let component = match accessor.component_type {
            None => ComponentType::Float,
            Some(code) => ComponentType::from_code(code).ok_or_else(|| {
                GlbError::UnsupportedAccessor(format!("component type {code}"))
            })?,
        };
        if accessor.normalized
            && matches!(component, ComponentType::UnsignedInt | ComponentType::Float)
        {
            return Err(GlbError::UnsupportedAccessor(format!(
                "normalized {component:?} components"
            )));
        }
        let element_size = component.size() * 3;

        // (window start, window length, stride)
        let (window_start, window_len, stride) = match accessor.buffer_view {
            None => (0, bin_len as u64, element_size),
            Some(index) => {
                let view = self
                    .descriptor
                    .buffer_views
                    .get(index)
                    .ok_or(GlbError::DanglingBufferView(index))?;
                let external = self
                    .descriptor
                    .buffers
                    .get(view.buffer)
                    .is_some_and(|buffer| buffer.uri.is_some());
                if view.buffer != 0 || external {
                    return Err(GlbError::UnsupportedAccessor(format!(
                        "buffer {} is not stored in the GLB container",
                        view.buffer
                    )));
                }
                let view_end = u64::from(view.byte_offset) + u64::from(view.byte_length);
                if view_end > bin_len as u64 {
                    return Err(GlbError::AccessorOutOfRange {
                        required: view_end,
                        available: bin_len,
                    });
                }
                let stride = match view.byte_stride {
                    Some(stride) if (stride as usize) < element_size => {
                        return Err(GlbError::UnsupportedAccessor(format!(
                            "byte stride {stride} is smaller than the {element_size}-byte element"
                        )))
                    }
                    Some(stride) => stride as usize,
                    None => element_size,
                };
                (view.byte_offset as usize, u64::from(view.byte_length), stride)
            }
        };

        // Last byte needed, relative to the window.
        let required = u64::from(accessor.byte_offset)
            + (u64::from(accessor.count) - 1) * stride as u64
            + element_size as u64;
        if required > window_len {
            return Err(GlbError::AccessorOutOfRange {
                required: window_start as u64 + required,
                available: bin_len,
            });
        }

        Ok(Layout {
            component,
            normalized: accessor.normalized,
            start: window_start + accessor.byte_offset as usize,
            stride,
        })
    }
}
