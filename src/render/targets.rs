use wgpu;

/// Multisampled color target the point pass renders into before resolving
/// to the swapchain. Absent when the adapter cannot multisample the surface
/// format, in which case the pass draws straight to the swapchain view.
pub(crate) struct RenderTargets {
    pub(crate) sample_count: u32,
    msaa: Option<(wgpu::Texture, wgpu::TextureView)>,
}

impl RenderTargets {
    pub(crate) fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        sample_count: u32,
        width: u32,
        height: u32,
    ) -> Self {
        let mut targets = Self {
            sample_count,
            msaa: None,
        };
        targets.recreate(device, format, width, height);
        targets
    }

    pub(crate) fn recreate(
        &mut self,
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) {
        if let Some((tex, _)) = self.msaa.take() {
            tex.destroy();
        }
        if self.sample_count <= 1 {
            return;
        }
        let tex = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("msaa_color"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: self.sample_count,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = tex.create_view(&wgpu::TextureViewDescriptor::default());
        self.msaa = Some((tex, view));
    }

    /// `(attachment, resolve_target)` for a pass that ends up in `frame_view`.
    pub(crate) fn attachment<'v>(
        &'v self,
        frame_view: &'v wgpu::TextureView,
    ) -> (&'v wgpu::TextureView, Option<&'v wgpu::TextureView>) {
        match &self.msaa {
            Some((_, view)) => (view, Some(frame_view)),
            None => (frame_view, None),
        }
    }

    pub(crate) fn destroy(&mut self) {
        if let Some((tex, _)) = self.msaa.take() {
            tex.destroy();
        }
    }
}
