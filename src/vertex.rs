use glam::{Mat4, Vec3};

/// One corner of a tile quad, laid out for direct upload to a vertex buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TileVertex {
    /// Pixel-space x, y and the layering depth.
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl TileVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3,  // position
        1 => Float32x2,  // uv
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TileVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }

    pub fn translated(self, offset: Vec3) -> Self {
        let p = Vec3::from_array(self.position) + offset;
        Self { position: p.to_array(), uv: self.uv }
    }
}

/// Format of the streams produced by `build_index_stream`, which caps a
/// single stream at `MAX_INDEXED_TILES` quads.
pub const INDEX_FORMAT: wgpu::IndexFormat = wgpu::IndexFormat::Uint32;

/// Orthographic projection (column-major) mapping pixel coords, origin top-left,
/// to clip space.  Depth covers eye-space z in `[-10, 1]`, enough headroom
/// for row bias on maps of a few hundred rows plus stacked layers.
pub fn orthographic_projection(width: f32, height: f32) -> [f32; 16] {
    Mat4::orthographic_rh(0.0, width, height, 0.0, -1.0, 10.0).to_cols_array()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<TileVertex>(), 20);
        assert_eq!(TileVertex::layout().array_stride, 20);
    }

    #[test]
    fn projection_maps_corners_to_clip_edges() {
        let m = Mat4::from_cols_array(&orthographic_projection(640.0, 480.0));
        let tl = m.project_point3(Vec3::new(0.0, 0.0, 0.0));
        let br = m.project_point3(Vec3::new(640.0, 480.0, 0.0));
        assert!((tl.x + 1.0).abs() < 1e-5 && (tl.y - 1.0).abs() < 1e-5);
        assert!((br.x - 1.0).abs() < 1e-5 && (br.y + 1.0).abs() < 1e-5);
    }

    #[test]
    fn projection_keeps_layer_depths_in_clip_range() {
        let m = Mat4::from_cols_array(&orthographic_projection(640.0, 480.0));
        for z in [0.0, 0.14, 0.34] {
            let p = m.project_point3(Vec3::new(10.0, 10.0, z));
            assert!((0.0..=1.0).contains(&p.z), "z={z} projected to {}", p.z);
        }
    }
}
