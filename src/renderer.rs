//! Uploads a scene to the GPU and draws it every frame.
//!
//! Geometry, materials and pipelines are created once in [`Renderer::new`];
//! per frame only the camera, lights and transform buffers are rewritten.
//! A frame is at most two passes: an optional depth-only shadow pass from
//! the shadow light's view, then the forward pass to the surface.

use wgpu::util::DeviceExt;

use crate::{
    camera::CameraUniform,
    lighting::{self, LightsUniform, SHADOW_MAP_SIZE},
    pipelines::{
        self, line::mk_line_pipeline, mesh::mk_mesh_pipeline, shadow::mk_shadow_pipeline,
    },
    scene::{NodeId, Renderable, Scene},
    viewport::{DepthTexture, Viewport},
};

enum DrawKind {
    Mesh,
    Lines,
}

struct Draw {
    node: NodeId,
    kind: DrawKind,
    transform_buffer: wgpu::Buffer,
    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,
    element_count: u32,
    material_bind_group: Option<wgpu::BindGroup>,
    double_sided: bool,
    cast_shadow: bool,
}

pub struct Renderer {
    mesh_pipeline: wgpu::RenderPipeline,
    mesh_pipeline_double_sided: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    shadow_pipeline: wgpu::RenderPipeline,
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    lights_buffer: wgpu::Buffer,
    lights_bind_group: wgpu::BindGroup,
    shadow_pass_bind_group: wgpu::BindGroup,
    shadow_map: DepthTexture,
    shadows_enabled: bool,
    draws: Vec<Draw>,
}

impl Renderer {
    pub fn new(viewport: &Viewport, scene: &Scene) -> Self {
        let device = &viewport.device;

        let camera_layout = pipelines::camera_bind_group_layout(device);
        let lights_layout = pipelines::lights_bind_group_layout(device);
        let material_layout = pipelines::material_bind_group_layout(device);
        let shadow_pass_layout = pipelines::shadow_pass_bind_group_layout(device);

        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj(&scene.camera);
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        let shadows_enabled = lighting::shadow_caster(&scene.lights).is_some();
        // a 1x1 placeholder keeps the bind group valid when nothing casts
        let shadow_map_size = if shadows_enabled { SHADOW_MAP_SIZE } else { 1 };
        let shadow_map = DepthTexture::create(
            device,
            [shadow_map_size, shadow_map_size],
            "shadow_map_texture",
        );
        let shadow_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("shadow_sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });

        let lights_buffer =
            lighting::mk_buffer(device, LightsUniform::from_lights(&scene.lights));
        let lights_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &lights_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: lights_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&shadow_map.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&shadow_sampler),
                },
            ],
            label: Some("lights_bind_group"),
        });
        let shadow_pass_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &shadow_pass_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: lights_buffer.as_entire_binding(),
            }],
            label: Some("shadow_pass_bind_group"),
        });

        let format = viewport.config.format;
        let mesh_pipeline = mk_mesh_pipeline(
            device,
            format,
            &camera_layout,
            &lights_layout,
            &material_layout,
            false,
        );
        let mesh_pipeline_double_sided = mk_mesh_pipeline(
            device,
            format,
            &camera_layout,
            &lights_layout,
            &material_layout,
            true,
        );
        let line_pipeline = mk_line_pipeline(device, format, &camera_layout);
        let shadow_pipeline = mk_shadow_pipeline(device, &shadow_pass_layout);

        let draws = upload_scene(device, scene, &material_layout);

        Self {
            mesh_pipeline,
            mesh_pipeline_double_sided,
            line_pipeline,
            shadow_pipeline,
            camera_uniform,
            camera_buffer,
            camera_bind_group,
            lights_buffer,
            lights_bind_group,
            shadow_pass_bind_group,
            shadow_map,
            shadows_enabled,
            draws,
        }
    }

    /// Draw one frame of `scene` into the viewport's surface.
    ///
    /// Surface errors are returned to the caller; `Lost`/`Outdated` are
    /// recovered there with a resize.
    pub fn render(
        &mut self,
        viewport: &Viewport,
        scene: &Scene,
    ) -> Result<(), wgpu::SurfaceError> {
        let queue = &viewport.queue;

        self.camera_uniform.update_view_proj(&scene.camera);
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        );
        queue.write_buffer(
            &self.lights_buffer,
            0,
            bytemuck::cast_slice(&[LightsUniform::from_lights(&scene.lights)]),
        );
        for draw in &self.draws {
            let raw = scene.world_transform(draw.node).to_raw();
            queue.write_buffer(&draw.transform_buffer, 0, bytemuck::cast_slice(&[raw]));
        }

        let output = viewport.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            viewport
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Render Encoder"),
                });

        if self.shadows_enabled {
            let mut shadow_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shadow Pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.shadow_map.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            shadow_pass.set_pipeline(&self.shadow_pipeline);
            shadow_pass.set_bind_group(0, &self.shadow_pass_bind_group, &[]);
            for draw in &self.draws {
                if !draw.cast_shadow || draw.element_count == 0 {
                    continue;
                }
                shadow_pass.set_vertex_buffer(0, draw.vertex_buffer.slice(..));
                shadow_pass.set_vertex_buffer(1, draw.transform_buffer.slice(..));
                match &draw.index_buffer {
                    Some(index_buffer) => {
                        shadow_pass
                            .set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                        shadow_pass.draw_indexed(0..draw.element_count, 0, 0..1);
                    }
                    None => shadow_pass.draw(0..draw.element_count, 0..1),
                }
            }
        }

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(scene.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &viewport.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            for draw in &self.draws {
                if draw.element_count == 0 {
                    log::warn!("skipping a draw with no elements");
                    continue;
                }
                match draw.kind {
                    DrawKind::Mesh => {
                        let pipeline = if draw.double_sided {
                            &self.mesh_pipeline_double_sided
                        } else {
                            &self.mesh_pipeline
                        };
                        render_pass.set_pipeline(pipeline);
                        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
                        render_pass.set_bind_group(1, &self.lights_bind_group, &[]);
                        if let Some(material) = &draw.material_bind_group {
                            render_pass.set_bind_group(2, material, &[]);
                        }
                        render_pass.set_vertex_buffer(0, draw.vertex_buffer.slice(..));
                        render_pass.set_vertex_buffer(1, draw.transform_buffer.slice(..));
                        if let Some(index_buffer) = &draw.index_buffer {
                            render_pass
                                .set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                            render_pass.draw_indexed(0..draw.element_count, 0, 0..1);
                        }
                    }
                    DrawKind::Lines => {
                        render_pass.set_pipeline(&self.line_pipeline);
                        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
                        render_pass.set_vertex_buffer(0, draw.vertex_buffer.slice(..));
                        render_pass.set_vertex_buffer(1, draw.transform_buffer.slice(..));
                        render_pass.draw(0..draw.element_count, 0..1);
                    }
                }
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

fn upload_scene(
    device: &wgpu::Device,
    scene: &Scene,
    material_layout: &wgpu::BindGroupLayout,
) -> Vec<Draw> {
    let mut draws = Vec::new();
    for node in scene.node_ids() {
        let Some(renderable) = scene.renderable(node) else {
            continue;
        };
        let transform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Transform Buffer"),
            contents: bytemuck::cast_slice(&[scene.world_transform(node).to_raw()]),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        match renderable {
            Renderable::Mesh {
                geometry,
                material,
                cast_shadow,
                receive_shadow,
            } => {
                let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Mesh Vertex Buffer"),
                    contents: bytemuck::cast_slice(&geometry.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Mesh Index Buffer"),
                    contents: bytemuck::cast_slice(&geometry.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
                let material_buffer =
                    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("Material Buffer"),
                        contents: bytemuck::cast_slice(&[material.to_uniform(*receive_shadow)]),
                        usage: wgpu::BufferUsages::UNIFORM,
                    });
                let material_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: material_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: material_buffer.as_entire_binding(),
                    }],
                    label: Some("material_bind_group"),
                });
                draws.push(Draw {
                    node,
                    kind: DrawKind::Mesh,
                    transform_buffer,
                    vertex_buffer,
                    index_buffer: Some(index_buffer),
                    element_count: geometry.indices.len() as u32,
                    material_bind_group: Some(material_bind_group),
                    double_sided: material.double_sided,
                    cast_shadow: *cast_shadow,
                });
            }
            Renderable::Lines { geometry } => {
                let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Line Vertex Buffer"),
                    contents: bytemuck::cast_slice(&geometry.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                draws.push(Draw {
                    node,
                    kind: DrawKind::Lines,
                    transform_buffer,
                    vertex_buffer,
                    index_buffer: None,
                    element_count: geometry.vertices.len() as u32,
                    material_bind_group: None,
                    double_sided: false,
                    cast_shadow: false,
                });
            }
        }
    }
    draws
}
