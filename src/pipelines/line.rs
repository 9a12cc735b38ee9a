//! Unlit pipeline for line lists (wireframes and helpers).

use crate::{
    pipelines::{self, RenderPipelineOptions, mk_render_pipeline},
    scene::{mesh::LineVertex, mesh::VertexLayout, transform::TransformRaw},
};

pub fn mk_line_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    camera_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Line Pipeline Layout"),
        bind_group_layouts: &[camera_layout],
        push_constant_ranges: &[],
    });

    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Line Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("line.wgsl").into()),
    };

    mk_render_pipeline(
        device,
        &layout,
        color_format,
        Some(wgpu::BlendState {
            alpha: wgpu::BlendComponent::REPLACE,
            color: wgpu::BlendComponent::REPLACE,
        }),
        Some(pipelines::DEPTH_FORMAT),
        &[LineVertex::desc(), TransformRaw::desc()],
        shader,
        RenderPipelineOptions {
            topology: wgpu::PrimitiveTopology::LineList,
            cull_mode: None,
        },
    )
}
